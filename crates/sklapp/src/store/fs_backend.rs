use super::backend::StorageBackend;
use crate::error::{Result, SklError};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// File-backed slots: each slot is `<root>/<slot>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !slot.starts_with('.');
        if !valid {
            return Err(SklError::Store(format!("Invalid slot name: {:?}", slot)));
        }
        Ok(self.root.join(format!("{}.json", slot)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SklError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(SklError::Io)?;
        Ok(Some(content))
    }

    fn write_slot(&self, slot: &str, content: &str) -> Result<()> {
        let target = self.slot_path(slot)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", slot, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(SklError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(SklError::Io(e));
        }
        Ok(())
    }

    fn remove_slot(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        if path.exists() {
            fs::remove_file(path).map_err(SklError::Io)?;
        }
        Ok(())
    }

    fn slot_location(&self, slot: &str) -> String {
        self.root
            .join(format!("{}.json", slot))
            .display()
            .to_string()
    }
}
