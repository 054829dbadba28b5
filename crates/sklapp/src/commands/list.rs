use crate::commands::helpers::listed_at;
use crate::commands::{CmdMessage, CmdResult};
use crate::document::ActiveDocument;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Stored records, newest first, with their list positions.
///
/// `search` matches baby or mother name, case-insensitively. Positions are
/// always the unfiltered ones so they can be used as selectors.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    doc: &ActiveDocument,
    search: Option<&str>,
) -> Result<CmdResult> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let listed: Vec<_> = store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| match &needle {
            Some(term) => {
                record.baby_name.to_lowercase().contains(term)
                    || record.mother_name.to_lowercase().contains(term)
            }
            None => true,
        })
        .map(|(index, record)| listed_at(index, record, doc))
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(match needle {
            Some(term) => format!("Tidak ada data yang cocok dengan \"{}\"", term),
            None => "Belum ada data tersimpan".to_string(),
        }));
    }
    Ok(result.with_listed_records(listed))
}
