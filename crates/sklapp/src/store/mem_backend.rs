use super::backend::StorageBackend;
use crate::error::{Result, SklError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` without locking.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw content (e.g. corrupt JSON).
    pub fn with_slot(self, slot: &str, content: &str) -> Self {
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), content.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw content of a slot.
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn write_slot(&self, slot: &str, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SklError::Store("Simulated write error".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_slot(&self, slot: &str) -> Result<()> {
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }

    fn slot_location(&self, slot: &str) -> String {
        format!("memory://{}", slot)
    }
}
