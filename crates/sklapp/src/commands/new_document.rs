use crate::commands::{CmdMessage, CmdResult};
use crate::document::ActiveDocument;
use crate::error::Result;

/// Discards the active document and starts an empty one. The store is not
/// touched; asking before discarding unsaved edits is up to the client.
pub fn run(doc: &mut ActiveDocument) -> Result<CmdResult> {
    let had_changes = doc.is_dirty();
    doc.reset();

    let mut result = CmdResult::default().with_document(doc);
    if had_changes {
        result.add_message(CmdMessage::warning("Perubahan yang belum disimpan dibuang"));
    }
    result.add_message(CmdMessage::info("Formulir baru"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::document::DocumentState;
    use crate::model::Field;

    #[test]
    fn resets_document_and_bumps_generation() {
        let mut doc = ActiveDocument::new();
        doc.set(Field::BabyName, "Aisyah").unwrap();
        let generation = doc.generation();

        let result = run(&mut doc).unwrap();
        assert_eq!(doc.state(), DocumentState::Empty);
        assert!(doc.generation() > generation);
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn clean_document_resets_quietly() {
        let mut doc = ActiveDocument::new();
        let result = run(&mut doc).unwrap();
        assert!(!result.has_level(MessageLevel::Warning));
    }
}
