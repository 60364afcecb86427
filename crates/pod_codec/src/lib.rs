//! JSON-shaped text codec for `pod_runtime` dictionaries.
//!
//! [`to_text`] walks a dictionary in insertion order and emits the compact
//! text form; [`parse`] runs a recursive-descent pass over the text and
//! rebuilds a dictionary, transferring each parsed value straight into it.
//! Serialization cannot fail; parsing reports the first malformed token with
//! its byte offset and leaves nothing charged against the heap gauge.

mod escape;
mod parse;
mod ser;

pub use crate::parse::{ParseError, ParseOptions, parse, parse_with};
pub use crate::ser::to_text;
