//! Compact string type with small string optimization.
//!
//! Dictionary keys are bounded, so most of them fit the inline buffer and
//! never touch the allocator. Longer content spills to a shared heap string.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;
use std::str;

pub const INLINE_CAP: usize = 22;

#[derive(Clone)]
pub enum Text {
    Inline { len: u8, buf: [u8; INLINE_CAP] },
    Heap { data: Rc<String> },
}

impl Text {
    pub fn new() -> Self {
        Self::Inline {
            len: 0,
            buf: [0u8; INLINE_CAP],
        }
    }

    pub fn from_str(s: &str) -> Self {
        if s.len() <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..s.len()].copy_from_slice(s.as_bytes());
            return Self::Inline {
                len: s.len() as u8,
                buf,
            };
        }
        Self::Heap {
            data: Rc::new(s.to_string()),
        }
    }

    pub fn from_string(s: String) -> Self {
        if s.len() <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..s.len()].copy_from_slice(s.as_bytes());
            return Self::Inline {
                len: s.len() as u8,
                buf,
            };
        }
        Self::Heap { data: Rc::new(s) }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Inline { len, buf } => {
                let s = &buf[..*len as usize];
                // Invariant: buf[..len] always holds complete UTF-8.
                unsafe { str::from_utf8_unchecked(s) }
            }
            Text::Heap { data } => data.as_str(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Text::Inline { len, .. } => *len as usize,
            Text::Heap { data } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_string(self) -> String {
        match self {
            Text::Inline { len, buf } => {
                let s = &buf[..len as usize];
                let ss = unsafe { str::from_utf8_unchecked(s) };
                ss.to_string()
            }
            Text::Heap { data } => match Rc::try_unwrap(data) {
                Ok(s) => s,
                Err(r) => (*r).clone(),
            },
        }
    }

    pub fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self {
            Text::Inline { len, buf } => {
                let cur = *len as usize;
                let new_len = cur + s.len();
                if new_len <= INLINE_CAP {
                    buf[cur..new_len].copy_from_slice(s.as_bytes());
                    *len = new_len as u8;
                    return;
                }
                let mut out = String::with_capacity(new_len);
                out.push_str(unsafe { str::from_utf8_unchecked(&buf[..cur]) });
                out.push_str(s);
                *self = Text::Heap { data: Rc::new(out) };
            }
            Text::Heap { data } => {
                let hm = Rc::make_mut(data);
                hm.reserve(s.len());
                hm.push_str(s);
            }
        }
    }

    pub fn is_ascii(&self) -> bool {
        match self {
            Text::Inline { len, buf } => buf[..*len as usize].iter().all(|&b| b < 128),
            Text::Heap { data } => data.is_ascii(),
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Text::Heap { data: a }, Text::Heap { data: b }) => {
                Rc::ptr_eq(a, b) || a.as_str() == b.as_str()
            }
            (Text::Inline { len: l1, buf: b1 }, Text::Inline { len: l2, buf: b2 }) => {
                l1 == l2 && b1[..*l1 as usize] == b2[..*l2 as usize]
            }
            _ => self.as_str() == other.as_str(),
        }
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().as_bytes().hash(state);
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::from_str(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::from_string(value)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}
