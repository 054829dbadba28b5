use crate::commands::helpers::{describe, listed, resolve, RecordSelector};
use crate::commands::{CmdMessage, CmdResult};
use crate::document::ActiveDocument;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Copies a stored record into the active document.
///
/// A selector that matches nothing leaves the document alone and reports a
/// warning. It is not an error.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    doc: &mut ActiveDocument,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let Some(id) = resolve(store, selector) else {
        tracing::warn!(%selector, "select: no matching record");
        let mut result = CmdResult::default().with_document(doc);
        result.add_message(CmdMessage::warning(format!(
            "Data {} tidak ditemukan",
            selector
        )));
        return Ok(result);
    };

    if let Some(record) = store.get(&id) {
        doc.replace(record);
    }

    let mut result = CmdResult::default().with_document(doc);
    if let Some(entry) = listed(store, doc, &id) {
        result.affected_records.push(entry);
    }
    result.add_message(CmdMessage::info(format!(
        "Mengedit: {}",
        describe(doc.record())
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{save, MessageLevel};
    use crate::document::DocumentState;
    use crate::model::{Field, RecordId};
    use crate::store::mem_backend::MemBackend;
    use crate::store::DEFAULT_SLOT;

    fn saved(names: &[&str]) -> RecordStore<MemBackend> {
        let mut store = RecordStore::open(MemBackend::new(), DEFAULT_SLOT);
        for name in names {
            let mut doc = ActiveDocument::new();
            doc.set(Field::BabyName, name).unwrap();
            save::run(&mut store, &mut doc).unwrap();
        }
        store
    }

    #[test]
    fn loads_copy_into_document() {
        let store = saved(&["A", "B"]);
        let mut doc = ActiveDocument::new();

        let result = run(&store, &mut doc, &RecordSelector::Position(2)).unwrap();
        assert_eq!(doc.record().baby_name, "A");
        assert_eq!(doc.state(), DocumentState::Saved);
        assert!(result.affected_records[0].is_active);
        assert_eq!(result.affected_records[0].position, 2);
    }

    #[test]
    fn unknown_identifier_leaves_document_unchanged() {
        let store = saved(&["A"]);
        let mut doc = ActiveDocument::new();
        doc.set(Field::MotherName, "Siti").unwrap();
        let generation = doc.generation();

        let result = run(&store, &mut doc, &RecordSelector::Id(RecordId::new("ghost"))).unwrap();
        assert_eq!(doc.record().mother_name, "Siti");
        assert!(doc.is_dirty());
        assert_eq!(doc.generation(), generation);
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn editing_the_copy_does_not_touch_store() {
        let store = saved(&["A"]);
        let mut doc = ActiveDocument::new();
        run(&store, &mut doc, &RecordSelector::Position(1)).unwrap();
        doc.set(Field::BabyName, "Z").unwrap();
        assert_eq!(store.records()[0].baby_name, "A");
    }
}
