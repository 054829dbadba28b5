//! Checkpoint of the active document between client sessions.
//!
//! A long-running UI keeps the document in memory. A client that runs one
//! action per process (the CLI) parks it in its own slot instead. The draft is
//! never part of the record store.

use super::backend::StorageBackend;
use crate::document::ActiveDocument;
use crate::error::Result;

pub const DRAFT_SLOT: &str = "skl_draft";

/// Reads the draft. Missing or unreadable drafts yield a fresh document.
pub fn load_draft<B: StorageBackend>(backend: &B, slot: &str) -> ActiveDocument {
    match backend.read_slot(slot) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(slot, error = %e, "draft is unreadable, starting a new document");
            ActiveDocument::new()
        }),
        Ok(None) => ActiveDocument::new(),
        Err(e) => {
            tracing::warn!(slot, error = %e, "could not read draft, starting a new document");
            ActiveDocument::new()
        }
    }
}

pub fn save_draft<B: StorageBackend>(backend: &B, slot: &str, doc: &ActiveDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(doc)?;
    backend.write_slot(slot, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn draft_survives_a_round_trip() {
        let backend = MemBackend::new();
        let mut doc = ActiveDocument::new();
        doc.set(Field::MotherName, "Siti").unwrap();
        save_draft(&backend, DRAFT_SLOT, &doc).unwrap();

        let restored = load_draft(&backend, DRAFT_SLOT);
        assert_eq!(restored.record().mother_name, "Siti");
        assert!(restored.is_dirty());
    }

    #[test]
    fn unreadable_draft_yields_new_document() {
        let backend = MemBackend::new().with_slot(DRAFT_SLOT, "garbage");
        let doc = load_draft(&backend, DRAFT_SLOT);
        assert!(doc.record().is_blank());
    }
}
