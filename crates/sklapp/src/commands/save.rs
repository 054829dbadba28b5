use crate::commands::helpers::{describe, listed};
use crate::commands::{CmdMessage, CmdResult, SaveOutcome};
use crate::document::ActiveDocument;
use crate::error::{Result, SklError};
use crate::store::{RecordStore, StorageBackend};
use chrono::Utc;

/// Inserts or updates the active document in the store.
///
/// Refused when neither the baby nor the mother is named. An identifier the
/// store does not know (deleted meanwhile, or a stale draft) is saved as a new
/// record. Either way the stored identifier flows back into the document.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, doc: &mut ActiveDocument) -> Result<CmdResult> {
    if !doc.record().has_identifying_name() {
        return Err(SklError::Validation(
            "Isi minimal nama bayi atau nama ibu sebelum menyimpan".to_string(),
        ));
    }

    let saved_at = Utc::now();
    let mut record = doc.record().clone();
    record.saved_at = Some(saved_at);
    if let Some(id) = record.id.as_ref() {
        if store.get(id).is_none() {
            tracing::warn!(id = %id, "saving record with unknown identifier as new");
        }
    }

    let upsert = store.upsert(record)?;
    doc.mark_saved(upsert.id.clone(), saved_at);

    let outcome = if upsert.created {
        SaveOutcome::Created
    } else {
        SaveOutcome::Updated
    };
    tracing::info!(id = %upsert.id, ?outcome, "record saved");

    let name = describe(doc.record());
    let mut result = CmdResult::default().with_document(doc);
    result.outcome = Some(outcome);
    if let Some(entry) = listed(store, doc, &upsert.id) {
        result.affected_records.push(entry);
    }
    result.add_message(CmdMessage::success(match outcome {
        SaveOutcome::Created => format!("Data tersimpan: {}", name),
        SaveOutcome::Updated => format!("Data diperbarui: {}", name),
    }));
    Ok(result)
}
