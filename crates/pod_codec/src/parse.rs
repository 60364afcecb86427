//! Text to dictionary.
//!
//! Recursive descent over four productions: object, array, string, and
//! value. Parsed values enter their parent container by ownership transfer,
//! so nothing is copied on the way in. Errors carry the byte offset of the
//! first malformed token; no recovery is attempted.

use pod_runtime::{Dict, DictError, Heap, List, Value};
use thiserror::Error;

/// Parser limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum object/array nesting depth.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Failure while parsing the text form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at byte {at}")]
    UnexpectedEnd { at: usize },

    #[error("expected {what} at byte {at}")]
    Expected { what: &'static str, at: usize },

    #[error("unterminated string starting at byte {at}")]
    UnterminatedString { at: usize },

    #[error("unsupported escape at byte {at}")]
    BadEscape { at: usize },

    #[error("malformed number at byte {at}")]
    BadNumber { at: usize },

    #[error("duplicate key `{key}` at byte {at}")]
    DuplicateKey { key: String, at: usize },

    #[error("key of {len} bytes at byte {at} exceeds the key limit")]
    KeyTooLong { len: usize, at: usize },

    #[error("trailing characters after document at byte {at}")]
    TrailingGarbage { at: usize },

    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Parse a complete document into a fresh dictionary allocated on `heap`.
pub fn parse(heap: &Heap, text: &str) -> Result<Dict, ParseError> {
    parse_with(heap, text, ParseOptions::default())
}

/// Like [`parse`], with explicit limits.
pub fn parse_with(heap: &Heap, text: &str, options: ParseOptions) -> Result<Dict, ParseError> {
    let mut parser = Parser {
        bytes: text.as_bytes(),
        pos: 0,
        heap,
        options,
    };
    parser.skip_ws();
    let dict = parser.object(0)?;
    parser.skip_ws();
    if parser.pos < parser.bytes.len() {
        return Err(ParseError::TrailingGarbage { at: parser.pos });
    }
    Ok(dict)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    heap: &'a Heap,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8, what: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::Expected { what, at: self.pos }),
            None => Err(ParseError::UnexpectedEnd { at: self.pos }),
        }
    }

    /// `bytes[from..to]` as text. Slice bounds always sit on ASCII bytes the
    /// parser itself positioned, so the cut never splits a UTF-8 sequence.
    fn slice(&self, from: usize, to: usize) -> &'a str {
        std::str::from_utf8(&self.bytes[from..to]).unwrap_or_default()
    }

    fn object(&mut self, depth: usize) -> Result<Dict, ParseError> {
        if depth >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
            });
        }
        self.expect(b'{', "`{`")?;
        let mut dict = Dict::new(self.heap);
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(dict);
        }
        loop {
            self.skip_ws();
            let key_at = self.pos;
            let key = self.string("key string")?;
            self.skip_ws();
            self.expect(b':', "`:` after key")?;
            self.skip_ws();
            let value = self.value(depth + 1)?;
            if let Err(err) = dict.insert(&key, value) {
                return Err(insert_error(err, key_at));
            }
            self.skip_ws();
            match self.bump() {
                Some(b',') => {}
                Some(b'}') => return Ok(dict),
                Some(_) => {
                    return Err(ParseError::Expected {
                        what: "`,` or `}`",
                        at: self.pos - 1,
                    });
                }
                None => return Err(ParseError::UnexpectedEnd { at: self.pos }),
            }
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
            });
        }
        self.expect(b'[', "`[`")?;
        let mut items = List::new(self.heap);
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(self.heap.list(items));
        }
        loop {
            self.skip_ws();
            let item = self.value(depth + 1)?;
            items.push(item);
            self.skip_ws();
            match self.bump() {
                Some(b',') => {}
                Some(b']') => return Ok(self.heap.list(items)),
                Some(_) => {
                    return Err(ParseError::Expected {
                        what: "`,` or `]`",
                        at: self.pos - 1,
                    });
                }
                None => return Err(ParseError::UnexpectedEnd { at: self.pos }),
            }
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'{') => {
                let dict = self.object(depth)?;
                Ok(self.heap.dict(dict))
            }
            Some(b'[') => self.array(depth),
            Some(b'"') => {
                let s = self.string("string")?;
                Ok(self.heap.text(&s))
            }
            Some(b't') => {
                self.literal(b"true", "`true`")?;
                Ok(self.heap.boolean(true))
            }
            Some(b'f') => {
                self.literal(b"false", "`false`")?;
                Ok(self.heap.boolean(false))
            }
            Some(b'n') => {
                self.literal(b"null", "`null`")?;
                Ok(self.heap.null())
            }
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(_) => Err(ParseError::Expected {
                what: "value",
                at: self.pos,
            }),
            None => Err(ParseError::UnexpectedEnd { at: self.pos }),
        }
    }

    fn literal(&mut self, lit: &'static [u8], what: &'static str) -> Result<(), ParseError> {
        if self.bytes[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            Ok(())
        } else {
            Err(ParseError::Expected { what, at: self.pos })
        }
    }

    fn string(&mut self, what: &'static str) -> Result<String, ParseError> {
        let start = self.pos;
        self.expect(b'"', what)?;
        let mut out = String::new();
        let mut run = self.pos;
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString { at: start }),
                Some(b'"') => {
                    out.push_str(self.slice(run, self.pos));
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(self.slice(run, self.pos));
                    let escape_at = self.pos;
                    self.pos += 1;
                    match self.bump() {
                        None => return Err(ParseError::UnterminatedString { at: start }),
                        Some(b'"') => out.push('"'),
                        Some(b'\\') => out.push('\\'),
                        Some(b'/') => out.push('/'),
                        Some(b'b') => out.push('\u{0008}'),
                        Some(b'f') => out.push('\u{000C}'),
                        Some(b'n') => out.push('\n'),
                        Some(b'r') => out.push('\r'),
                        Some(b't') => out.push('\t'),
                        Some(_) => return Err(ParseError::BadEscape { at: escape_at }),
                    }
                    run = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let mut saw_digit = false;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
            saw_digit = true;
        }
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                saw_digit = true;
            }
        }
        if !saw_digit {
            return Err(ParseError::BadNumber { at: start });
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let mut saw_exp_digit = false;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                saw_exp_digit = true;
            }
            if !saw_exp_digit {
                return Err(ParseError::BadNumber { at: start });
            }
        }
        let text = self.slice(start, self.pos);
        // A dot or exponent decides the shape; the literal, not a schema,
        // picks between int and float. Integer literals past i64 fall back
        // to uint, then to float.
        if is_float {
            return match text.parse::<f64>() {
                Ok(f) => Ok(self.heap.float(f)),
                Err(_) => Err(ParseError::BadNumber { at: start }),
            };
        }
        if let Ok(i) = text.parse::<i64>() {
            return Ok(self.heap.int(i));
        }
        if let Ok(u) = text.parse::<u64>() {
            return Ok(self.heap.uint(u));
        }
        match text.parse::<f64>() {
            Ok(f) => Ok(self.heap.float(f)),
            Err(_) => Err(ParseError::BadNumber { at: start }),
        }
    }
}

fn insert_error(err: DictError, at: usize) -> ParseError {
    let reason = match err {
        DictError::Rejected { reason, .. } => *reason,
        other => other,
    };
    match reason {
        DictError::DuplicateKey { key } => ParseError::DuplicateKey { key, at },
        DictError::KeyTooLong { len } => ParseError::KeyTooLong { len, at },
        _ => ParseError::Expected {
            what: "object entry",
            at,
        },
    }
}
