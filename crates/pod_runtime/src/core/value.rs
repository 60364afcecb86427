//! Boxed dynamic value representation.
//!
//! A [`Value`] is one heap allocation: the shape's descriptor tag first, then
//! the gauge the instance is charged against, then the payload itself. The
//! payload is an exhaustive enum, so every shape-specific operation is a
//! `match` and an instance can never disagree with its tag. Ownership follows
//! Rust moves: whoever holds the `Value` destroys it exactly once, and
//! handing it to a container is a transfer the compiler enforces.

use std::fmt;

use crate::core::descriptor::{Capability, Descriptor, Selector};
use crate::core::dict::Dict;
use crate::core::heap::Heap;
use crate::core::list::List;
use crate::core::text::Text;
use crate::errors::ValueError;

/// Shape-specific storage for one value.
pub enum Payload {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Text(Text),
    List(List),
    Dict(Dict),
}

pub(crate) struct Inner {
    desc: &'static Descriptor,
    heap: Heap,
    payload: Payload,
}

/// Bytes charged per live instance.
pub(crate) const INSTANCE_SIZE: usize = std::mem::size_of::<Inner>();

impl Drop for Inner {
    fn drop(&mut self) {
        self.heap.release(self.desc.size);
    }
}

/// A heap-owned, shape-tagged unit of data.
pub struct Value {
    inner: Box<Inner>,
}

impl Value {
    /// Build the shape's zero value (descriptor construct function).
    pub(crate) fn new(desc: &'static Descriptor, heap: Heap) -> Self {
        let payload = (desc.init)(&heap);
        Self::from_payload(desc, heap, payload)
    }

    pub(crate) fn from_payload(desc: &'static Descriptor, heap: Heap, payload: Payload) -> Self {
        heap.charge(desc.size);
        Value {
            inner: Box::new(Inner { desc, heap, payload }),
        }
    }

    pub fn descriptor(&self) -> &'static Descriptor {
        self.inner.desc
    }

    pub fn shape_name(&self) -> &'static str {
        self.inner.desc.name
    }

    /// Identity check against a descriptor. This is the guard every
    /// shape-specific caller runs before touching the payload.
    pub fn is_of(&self, desc: &Descriptor) -> bool {
        std::ptr::eq(self.inner.desc, desc)
    }

    /// The gauge this instance is charged against.
    pub fn heap(&self) -> &Heap {
        &self.inner.heap
    }

    pub fn payload(&self) -> &Payload {
        &self.inner.payload
    }

    /// Deep-duplicate this value. Fails when the shape (or a transitive
    /// child) declares no copy support; the partial copy is destroyed and
    /// nothing stays charged.
    pub fn deep_copy(&self) -> Result<Value, ValueError> {
        let copy = self.inner.desc.copy.ok_or(ValueError::NotCopyable {
            shape: self.inner.desc.name,
        })?;
        let payload = copy(self)?;
        Ok(Self::from_payload(
            self.inner.desc,
            self.inner.heap.clone(),
            payload,
        ))
    }

    /// Render through the shape's Render capability, if it has one.
    pub fn render(&self) -> Option<String> {
        let mut out = String::new();
        if self.render_into(&mut out) { Some(out) } else { None }
    }

    /// Append the rendered form to `out`. Returns `false` when the shape has
    /// no Render capability and `out` is left untouched.
    pub fn render_into(&self, out: &mut String) -> bool {
        match self.inner.desc.capability(Selector::Render) {
            Some(Capability::Render(render)) => {
                render(self, out);
                true
            }
            _ => false,
        }
    }

    /// Deep equality through the Equals capability. Values of differing
    /// shapes are unequal by definition, before any dispatch happens.
    pub fn equals(&self, other: &Value) -> bool {
        if !std::ptr::eq(self.inner.desc, other.inner.desc) {
            return false;
        }
        match self.inner.desc.capability(Selector::Equals) {
            Some(Capability::Equals(eq)) => eq(self, other),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Shape accessors. A mismatched shape reads as absent, never a panic.
    // ------------------------------------------------------------------

    pub fn is_null(&self) -> bool {
        matches!(self.inner.payload, Payload::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.inner.payload {
            Payload::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn set_bool(&mut self, value: bool) -> bool {
        match &mut self.inner.payload {
            Payload::Bool(slot) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.inner.payload {
            Payload::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn set_int(&mut self, value: i64) -> bool {
        match &mut self.inner.payload {
            Payload::Int(slot) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self.inner.payload {
            Payload::Uint(u) => Some(u),
            _ => None,
        }
    }

    pub fn set_uint(&mut self, value: u64) -> bool {
        match &mut self.inner.payload {
            Payload::Uint(slot) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.inner.payload {
            Payload::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn set_float(&mut self, value: f64) -> bool {
        match &mut self.inner.payload {
            Payload::Float(slot) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.inner.payload {
            Payload::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn set_text(&mut self, value: &str) -> bool {
        match &mut self.inner.payload {
            Payload::Text(slot) => {
                *slot = Text::from_str(value);
                true
            }
            _ => false,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.inner.payload {
            Payload::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        match &mut self.inner.payload {
            Payload::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match &self.inner.payload {
            Payload::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match &mut self.inner.payload {
            Payload::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match &self.inner.payload {
            Payload::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match &mut self.inner.payload {
            Payload::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.payload {
            Payload::Null => write!(f, "Null"),
            Payload::Bool(b) => write!(f, "Bool({})", b),
            Payload::Int(i) => write!(f, "Int({})", i),
            Payload::Uint(u) => write!(f, "Uint({})", u),
            Payload::Float(x) => write!(f, "Float({})", x),
            Payload::Bytes(b) => write!(f, "Bytes(len={})", b.len()),
            Payload::Text(t) => write!(f, "Text({:?})", t.as_str()),
            Payload::List(l) => write!(f, "List(len={})", l.len()),
            Payload::Dict(d) => write!(f, "Dict(len={})", d.len()),
        }
    }
}
