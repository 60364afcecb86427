//! Shape descriptors and capability dispatch.
//!
//! One immutable [`Descriptor`] exists per concrete value shape. A descriptor
//! knows how to build the shape's zero payload, optionally how to deep-copy
//! it, and which named capabilities the shape supports. Capability lookup is
//! the runtime's only polymorphism mechanism: a shape that does not answer a
//! selector simply returns `None` and the caller applies its own default.
//! Adding a capability to a shape means adding an arm to that shape's lookup
//! function.

use std::fmt;

use crate::core::heap::Heap;
use crate::core::value::{INSTANCE_SIZE, Payload, Value};
use crate::core::{dict::Dict, list::List, text::Text};
use crate::errors::ValueError;

/// Named capability selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Produce a readable text form of the value.
    Render,
    /// Deep equality against another value of the same shape.
    Equals,
}

pub type RenderFn = fn(&Value, &mut String);
pub type EqualsFn = fn(&Value, &Value) -> bool;

/// A capability resolved for a concrete shape.
#[derive(Clone, Copy)]
pub enum Capability {
    Render(RenderFn),
    Equals(EqualsFn),
}

type InitFn = fn(&Heap) -> Payload;
type CopyFn = fn(&Value) -> Result<Payload, ValueError>;
type CapsFn = fn(Selector) -> Option<Capability>;

/// Immutable metadata record describing one value shape.
pub struct Descriptor {
    pub name: &'static str,
    /// Bytes charged against the heap gauge per instance.
    pub size: usize,
    pub(crate) init: InitFn,
    pub(crate) copy: Option<CopyFn>,
    caps: CapsFn,
}

impl Descriptor {
    /// Look up a capability; `None` means the shape does not support it.
    pub fn capability(&self, selector: Selector) -> Option<Capability> {
        (self.caps)(selector)
    }

    /// Identity comparison. Descriptors are statics, so pointer equality is
    /// shape equality.
    pub fn is(&self, other: &Descriptor) -> bool {
        std::ptr::eq(self, other)
    }

    pub fn is_copyable(&self) -> bool {
        self.copy.is_some()
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor").field("name", &self.name).finish()
    }
}

// ============================================================================
// Shape tables
// ============================================================================

pub static NULL: Descriptor = Descriptor {
    name: "null",
    size: INSTANCE_SIZE,
    init: null_init,
    copy: Some(null_copy),
    caps: null_caps,
};

pub static BOOL: Descriptor = Descriptor {
    name: "bool",
    size: INSTANCE_SIZE,
    init: bool_init,
    copy: Some(bool_copy),
    caps: bool_caps,
};

pub static INT: Descriptor = Descriptor {
    name: "int",
    size: INSTANCE_SIZE,
    init: int_init,
    copy: Some(int_copy),
    caps: int_caps,
};

pub static UINT: Descriptor = Descriptor {
    name: "uint",
    size: INSTANCE_SIZE,
    init: uint_init,
    copy: Some(uint_copy),
    caps: uint_caps,
};

pub static FLOAT: Descriptor = Descriptor {
    name: "float",
    size: INSTANCE_SIZE,
    init: float_init,
    copy: Some(float_copy),
    caps: float_caps,
};

/// Opaque byte blob. Carries no copy support and no Render capability, which
/// makes it the shape that exercises every "unsupported" fallback path.
pub static BYTES: Descriptor = Descriptor {
    name: "bytes",
    size: INSTANCE_SIZE,
    init: bytes_init,
    copy: None,
    caps: bytes_caps,
};

pub static TEXT: Descriptor = Descriptor {
    name: "text",
    size: INSTANCE_SIZE,
    init: text_init,
    copy: Some(text_copy),
    caps: text_caps,
};

pub static LIST: Descriptor = Descriptor {
    name: "list",
    size: INSTANCE_SIZE,
    init: list_init,
    copy: Some(list_copy),
    caps: list_caps,
};

pub static DICT: Descriptor = Descriptor {
    name: "dict",
    size: INSTANCE_SIZE,
    init: dict_init,
    copy: Some(dict_copy),
    caps: dict_caps,
};

// ============================================================================
// null
// ============================================================================

fn null_init(_heap: &Heap) -> Payload {
    Payload::Null
}

fn null_copy(_value: &Value) -> Result<Payload, ValueError> {
    Ok(Payload::Null)
}

fn null_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => Some(Capability::Render(|_, out| out.push_str("null"))),
        Selector::Equals => Some(Capability::Equals(|_, _| true)),
    }
}

// ============================================================================
// bool
// ============================================================================

fn bool_init(_heap: &Heap) -> Payload {
    Payload::Bool(false)
}

fn bool_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::Bool(b) => Ok(Payload::Bool(*b)),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn bool_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => Some(Capability::Render(|v, out| {
            out.push_str(if v.as_bool() == Some(true) { "true" } else { "false" });
        })),
        Selector::Equals => Some(Capability::Equals(|a, b| a.as_bool() == b.as_bool())),
    }
}

// ============================================================================
// int
// ============================================================================

fn int_init(_heap: &Heap) -> Payload {
    Payload::Int(0)
}

fn int_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::Int(i) => Ok(Payload::Int(*i)),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn int_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => Some(Capability::Render(|v, out| {
            if let Some(i) = v.as_int() {
                let mut buf = itoa::Buffer::new();
                out.push_str(buf.format(i));
            }
        })),
        Selector::Equals => Some(Capability::Equals(|a, b| a.as_int() == b.as_int())),
    }
}

// ============================================================================
// uint
// ============================================================================

fn uint_init(_heap: &Heap) -> Payload {
    Payload::Uint(0)
}

fn uint_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::Uint(u) => Ok(Payload::Uint(*u)),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn uint_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => Some(Capability::Render(|v, out| {
            if let Some(u) = v.as_uint() {
                let mut buf = itoa::Buffer::new();
                out.push_str(buf.format(u));
            }
        })),
        Selector::Equals => Some(Capability::Equals(|a, b| a.as_uint() == b.as_uint())),
    }
}

// ============================================================================
// float
// ============================================================================

fn float_init(_heap: &Heap) -> Payload {
    Payload::Float(0.0)
}

fn float_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::Float(f) => Ok(Payload::Float(*f)),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn float_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => Some(Capability::Render(|v, out| {
            if let Some(f) = v.as_float() {
                // Shortest form that parses back to the same bits. Whole
                // floats keep a trailing `.0` so they stay floats on reparse.
                let mut buf = ryu::Buffer::new();
                out.push_str(buf.format(f));
            }
        })),
        // IEEE semantics: NaN payloads are never equal to anything.
        Selector::Equals => Some(Capability::Equals(|a, b| match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        })),
    }
}

// ============================================================================
// bytes
// ============================================================================

fn bytes_init(_heap: &Heap) -> Payload {
    Payload::Bytes(Vec::new())
}

fn bytes_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => None,
        Selector::Equals => Some(Capability::Equals(|a, b| a.as_bytes() == b.as_bytes())),
    }
}

// ============================================================================
// text
// ============================================================================

fn text_init(_heap: &Heap) -> Payload {
    Payload::Text(Text::new())
}

fn text_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::Text(t) => Ok(Payload::Text(Text::from_str(t.as_str()))),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn text_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => Some(Capability::Render(|v, out| {
            if let Some(s) = v.as_text() {
                out.push_str(s);
            }
        })),
        Selector::Equals => Some(Capability::Equals(|a, b| a.as_text() == b.as_text())),
    }
}

// ============================================================================
// list
// ============================================================================

fn list_init(heap: &Heap) -> Payload {
    Payload::List(List::new(heap))
}

fn list_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::List(items) => Ok(Payload::List(items.deep_copy()?)),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn list_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => None,
        Selector::Equals => Some(Capability::Equals(|a, b| {
            match (a.payload(), b.payload()) {
                (Payload::List(x), Payload::List(y)) => x.deep_eq(y),
                _ => false,
            }
        })),
    }
}

// ============================================================================
// dict
// ============================================================================

fn dict_init(heap: &Heap) -> Payload {
    Payload::Dict(Dict::new(heap))
}

fn dict_copy(value: &Value) -> Result<Payload, ValueError> {
    match value.payload() {
        Payload::Dict(entries) => Ok(Payload::Dict(entries.deep_copy()?)),
        _ => Err(ValueError::NotCopyable { shape: value.shape_name() }),
    }
}

fn dict_caps(selector: Selector) -> Option<Capability> {
    match selector {
        Selector::Render => None,
        Selector::Equals => Some(Capability::Equals(|a, b| {
            match (a.payload(), b.payload()) {
                (Payload::Dict(x), Payload::Dict(y)) => x.deep_eq(y),
                _ => false,
            }
        })),
    }
}
