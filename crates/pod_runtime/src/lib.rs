//! Dynamic value runtime: shape descriptors, boxed values, capability
//! dispatch, and the insertion-ordered dictionary built on top of them.

pub mod core;
pub mod errors;

// Re-exports from core/
pub use crate::core::descriptor::{BOOL, BYTES, DICT, FLOAT, INT, LIST, NULL, TEXT, UINT};
pub use crate::core::descriptor::{Capability, Descriptor, EqualsFn, RenderFn, Selector};
pub use crate::core::dict::{Dict, KEY_MAX_LEN};
pub use crate::core::heap::Heap;
pub use crate::core::list::List;
pub use crate::core::text::Text;
pub use crate::core::value::{Payload, Value};

// Re-exports from errors
pub use crate::errors::{DictError, ValueError};
