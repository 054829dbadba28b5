use crate::commands::helpers::{describe, listed, resolve, RecordSelector};
use crate::commands::{CmdMessage, CmdResult};
use crate::document::ActiveDocument;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// What `run` would delete, for the client's confirmation prompt.
/// Nothing is modified.
pub fn preview<B: StorageBackend>(
    store: &RecordStore<B>,
    doc: &ActiveDocument,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match resolve(store, selector).and_then(|id| listed(store, doc, &id)) {
        Some(entry) => result.affected_records.push(entry),
        None => result.add_message(CmdMessage::warning(format!(
            "Data {} tidak ditemukan",
            selector
        ))),
    }
    Ok(result)
}

/// Removes a stored record. If it is the one being edited, the active
/// document is reset. A selector that matches nothing is a no-op.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    doc: &mut ActiveDocument,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let Some(id) = resolve(store, selector) else {
        tracing::warn!(%selector, "delete: no matching record");
        let mut result = CmdResult::default().with_document(doc);
        result.add_message(CmdMessage::warning(format!(
            "Data {} tidak ditemukan",
            selector
        )));
        return Ok(result);
    };

    let entry = listed(store, doc, &id);
    let Some(removed) = store.remove(&id)? else {
        return Ok(CmdResult::default().with_document(doc));
    };
    tracing::info!(id = %id, "record deleted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Data dihapus: {}",
        describe(&removed)
    )));
    if doc.id() == Some(&id) {
        doc.reset();
        result.add_message(CmdMessage::info("Formulir dikosongkan"));
    }
    result.affected_records.extend(entry);
    Ok(result.with_document(doc))
}
