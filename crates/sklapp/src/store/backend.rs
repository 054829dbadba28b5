use crate::error::Result;

/// Abstract interface for raw slot I/O.
///
/// A slot is a named unit of storage holding one JSON document, the way a
/// browser's local storage holds one string per key. This trait handles the
/// "how" (filesystem vs memory); [`super::RecordStore`] handles the "what".
pub trait StorageBackend {
    /// Read a slot. Returns Ok(None) if the slot was never written.
    fn read_slot(&self, slot: &str) -> Result<Option<String>>;

    /// Replace the slot content.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_slot(&self, slot: &str, content: &str) -> Result<()>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove_slot(&self, slot: &str) -> Result<()>;

    /// Human readable location of the slot (a path, or a virtual URI).
    fn slot_location(&self, slot: &str) -> String;
}
