//! Allocation accounting and value construction.
//!
//! A [`Heap`] is a cloneable handle to a live-byte gauge. Every [`Value`]
//! built through a heap charges its descriptor's size against the gauge and
//! releases the charge when it is dropped, so a gauge that reads zero after a
//! scenario proves nothing leaked. Handles are cheap to clone and two clones
//! observe the same counters; tests create one heap each and stay independent
//! of one another.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::core::descriptor::{self, Descriptor};
use crate::core::dict::Dict;
use crate::core::list::List;
use crate::core::text::Text;
use crate::core::value::{Payload, Value};

#[derive(Debug, Default)]
struct Counters {
    live_bytes: Cell<usize>,
    live_objects: Cell<usize>,
}

/// Handle to an allocation gauge.
#[derive(Clone, Debug, Default)]
pub struct Heap {
    counters: Rc<Counters>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently charged by live values.
    pub fn live_bytes(&self) -> usize {
        self.counters.live_bytes.get()
    }

    /// Number of live values.
    pub fn live_objects(&self) -> usize {
        self.counters.live_objects.get()
    }

    /// Whether two handles observe the same gauge.
    pub fn same_gauge(&self, other: &Heap) -> bool {
        Rc::ptr_eq(&self.counters, &other.counters)
    }

    /// Construct a fresh value of the given shape with its zero payload.
    pub fn alloc(&self, desc: &'static Descriptor) -> Value {
        Value::new(desc, self.clone())
    }

    pub fn null(&self) -> Value {
        Value::from_payload(&descriptor::NULL, self.clone(), Payload::Null)
    }

    pub fn boolean(&self, value: bool) -> Value {
        Value::from_payload(&descriptor::BOOL, self.clone(), Payload::Bool(value))
    }

    pub fn int(&self, value: i64) -> Value {
        Value::from_payload(&descriptor::INT, self.clone(), Payload::Int(value))
    }

    pub fn uint(&self, value: u64) -> Value {
        Value::from_payload(&descriptor::UINT, self.clone(), Payload::Uint(value))
    }

    pub fn float(&self, value: f64) -> Value {
        Value::from_payload(&descriptor::FLOAT, self.clone(), Payload::Float(value))
    }

    pub fn text(&self, value: &str) -> Value {
        Value::from_payload(
            &descriptor::TEXT,
            self.clone(),
            Payload::Text(Text::from_str(value)),
        )
    }

    pub fn bytes(&self, value: Vec<u8>) -> Value {
        Value::from_payload(&descriptor::BYTES, self.clone(), Payload::Bytes(value))
    }

    /// Wrap an already-built list into a value, taking ownership of it.
    pub fn list(&self, list: List) -> Value {
        Value::from_payload(&descriptor::LIST, self.clone(), Payload::List(list))
    }

    /// Wrap an already-built dictionary into a value, taking ownership of it.
    pub fn dict(&self, dict: Dict) -> Value {
        Value::from_payload(&descriptor::DICT, self.clone(), Payload::Dict(dict))
    }

    pub(crate) fn charge(&self, bytes: usize) {
        let c = &self.counters;
        c.live_bytes.set(c.live_bytes.get() + bytes);
        c.live_objects.set(c.live_objects.get() + 1);
    }

    pub(crate) fn release(&self, bytes: usize) {
        let c = &self.counters;
        c.live_bytes.set(c.live_bytes.get() - bytes);
        c.live_objects.set(c.live_objects.get() - 1);
    }
}

impl fmt::Display for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} objects, {} bytes live",
            self.live_objects(),
            self.live_bytes()
        )
    }
}
