//! In-process slot backend.

use std::{
    cell::RefCell,
    rc::Rc,
};

use hashbrown::HashMap;

use super::{PersistResult, SlotBackend};

#[derive(Debug, Default)]
struct Slots {
    values: HashMap<String, String>,
    writes: usize,
}

/// Map-backed [`SlotBackend`]; clones share the same slots.
///
/// Sharing lets a test keep a handle for inspection after moving a clone
/// into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Rc<RefCell<Slots>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with `key` preloaded to `value`.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend
            .inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        backend
    }

    /// Current raw value of `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Number of writes performed so far.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl SlotBackend for MemoryBackend {
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write_slot(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut slots = self.inner.borrow_mut();
        slots.values.insert(key.to_string(), value.to_string());
        slots.writes += 1;
        Ok(())
    }
}
