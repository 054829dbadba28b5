use crate::commands::{CmdMessage, CmdResult};
use crate::document::ActiveDocument;
use crate::error::{Result, SklError};
use crate::model::Field;
use crate::roster::Assistant;

/// Sets fields on the active document.
///
/// All assignments are checked before any is applied: an unknown key or an
/// invalid enumeration value leaves the document as it was.
pub fn set_fields(doc: &mut ActiveDocument, assignments: &[(String, String)]) -> Result<CmdResult> {
    let mut parsed = Vec::with_capacity(assignments.len());
    let mut probe = doc.record().clone();
    for (key, value) in assignments {
        let field: Field = key.parse()?;
        probe.set(field, value.trim())?;
        parsed.push((field, value.trim()));
    }

    let mut result = CmdResult::default();
    for (field, value) in parsed {
        doc.set(field, value)?;
        result.add_message(CmdMessage::info(format!(
            "{}: {}",
            field.label(),
            if value.is_empty() { "(kosong)" } else { value }
        )));
    }
    Ok(result.with_document(doc))
}

/// Parses `key=value` pairs.
pub fn parse_assignments<S: AsRef<str>>(raw: &[S]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|item| {
            let item = item.as_ref();
            item.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| SklError::Api(format!("Expected KEY=VALUE, got {:?}", item)))
        })
        .collect()
}

/// Copies roster entry `number` (1-based) into the assistant fields.
pub fn assign_assistant(doc: &mut ActiveDocument, roster: &[Assistant], number: usize) -> Result<CmdResult> {
    let assistant = number
        .checked_sub(1)
        .and_then(|i| roster.get(i))
        .ok_or_else(|| {
            SklError::Api(format!(
                "Penolong nomor {} tidak ada (1-{})",
                number,
                roster.len()
            ))
        })?;
    doc.apply_assistant(assistant);

    let mut result = CmdResult::default().with_document(doc);
    result.add_message(CmdMessage::info(format!("Penolong: {}", assistant.name)));
    Ok(result)
}
