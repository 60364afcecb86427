//! Insertion-ordered dictionary of owned values.
//!
//! Entries keep the order they were inserted in; that order is data, it
//! drives both iteration and the text form. Keys are unique and bounded.
//! Lookup is a linear scan, which beats hashing for the handful of entries
//! these dictionaries carry in practice.

use std::fmt;

use crate::core::descriptor::Descriptor;
use crate::core::heap::Heap;
use crate::core::text::Text;
use crate::core::value::Value;
use crate::errors::{DictError, ValueError};

/// Longest accepted key, in bytes.
pub const KEY_MAX_LEN: usize = 64;

struct Entry {
    key: Text,
    value: Value,
}

/// Ordered sequence of `(key, owned value)` pairs with unique keys.
pub struct Dict {
    heap: Heap,
    entries: Vec<Entry>,
}

impl Dict {
    pub fn new(heap: &Heap) -> Self {
        Self {
            heap: heap.clone(),
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(heap: &Heap, capacity: usize) -> Self {
        Self {
            heap: heap.clone(),
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key.as_str() == key)
    }

    fn check_key(&self, key: &str) -> Result<(), DictError> {
        if key.len() > KEY_MAX_LEN {
            return Err(DictError::KeyTooLong { len: key.len() });
        }
        if self.find(key).is_some() {
            return Err(DictError::DuplicateKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn push_entry(&mut self, key: &str, value: Value) -> &mut Value {
        self.entries.push(Entry {
            key: Text::from_str(key),
            value,
        });
        let last = self.entries.len() - 1;
        &mut self.entries[last].value
    }

    /// Construct a fresh value of `desc` under `key` and hand back a mutable
    /// reference for further setup. The dictionary owns the new value.
    pub fn add_new(
        &mut self,
        key: &str,
        desc: &'static Descriptor,
    ) -> Result<&mut Value, DictError> {
        self.check_key(key)?;
        let value = self.heap.alloc(desc);
        Ok(self.push_entry(key, value))
    }

    /// Deep-copy `source` and insert the copy under `key`. Fails when the
    /// source shape carries no copy support.
    pub fn add_copy(&mut self, key: &str, source: &Value) -> Result<&mut Value, DictError> {
        self.check_key(key)?;
        let value = source.deep_copy()?;
        Ok(self.push_entry(key, value))
    }

    /// Insert an already-built value, taking ownership without copying. A
    /// rejected insert hands the value back inside the error instead of
    /// destroying it.
    pub fn insert(&mut self, key: &str, value: Value) -> Result<&mut Value, DictError> {
        if let Err(reason) = self.check_key(key) {
            return Err(DictError::Rejected {
                value,
                reason: Box::new(reason),
            });
        }
        Ok(self.push_entry(key, value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.find(key).map(|i| &self.entries[i].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.find(key).map(|i| &mut self.entries[i].value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Destroy the value under `key`. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.find(key) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove the entry under `key` and transfer its value out to the caller.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.find(key).map(|i| self.entries.remove(i).value)
    }

    /// Destroy every owned value and drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Deep-copy every entry of `other` into `self`. Stops at the first entry
    /// that cannot be copied or whose key already exists; entries merged
    /// before the failure stay owned by `self`.
    pub fn merge(&mut self, other: &Dict) -> Result<(), DictError> {
        for (key, value) in other.iter() {
            self.check_key(key)?;
            let copy = value.deep_copy()?;
            self.push_entry(key, copy);
        }
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|e| &mut e.value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    /// Deep-copy the whole dictionary. Fails when any transitive value has no
    /// copy support; the partial copy is destroyed.
    pub fn deep_copy(&self) -> Result<Dict, ValueError> {
        let mut out = Dict::with_capacity(&self.heap, self.entries.len());
        for entry in &self.entries {
            out.entries.push(Entry {
                key: Text::from_str(entry.key.as_str()),
                value: entry.value.deep_copy()?,
            });
        }
        Ok(out)
    }

    /// Order-sensitive deep equality: same key sequence, equal values.
    pub fn deep_eq(&self, other: &Dict) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.key == b.key && a.value.equals(&b.value))
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
