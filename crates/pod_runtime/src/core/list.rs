//! Ordered heterogeneous sequence of owned values.

use std::fmt;

use smallvec::SmallVec;

use crate::core::descriptor::Descriptor;
use crate::core::heap::Heap;
use crate::core::value::Value;
use crate::errors::ValueError;

/// Most lists stay small; keep the first few elements inline.
type Items = SmallVec<[Value; 4]>;

/// Ordered sequence of owned values of any shape.
pub struct List {
    heap: Heap,
    items: Items,
}

impl List {
    pub fn new(heap: &Heap) -> Self {
        Self {
            heap: heap.clone(),
            items: Items::new(),
        }
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an already-built value, taking ownership.
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Append a fresh zero value of `desc` and hand back a mutable reference.
    pub fn push_new(&mut self, desc: &'static Descriptor) -> &mut Value {
        self.items.push(self.heap.alloc(desc));
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Append a deep copy of `source`.
    pub fn push_copy(&mut self, source: &Value) -> Result<&mut Value, ValueError> {
        let value = source.deep_copy()?;
        self.items.push(value);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Remove the element at `index` and transfer it out to the caller.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.items.iter_mut()
    }

    /// Deep-copy every element. Fails when any transitive element has no copy
    /// support; the partial copy is destroyed.
    pub fn deep_copy(&self) -> Result<List, ValueError> {
        let mut items = Items::with_capacity(self.items.len());
        for item in &self.items {
            items.push(item.deep_copy()?);
        }
        Ok(List {
            heap: self.heap.clone(),
            items,
        })
    }

    /// Element-wise deep equality.
    pub fn deep_eq(&self, other: &List) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.equals(b))
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
