use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::{Record, RecordId};
use std::collections::HashSet;

/// Slot holding the saved records.
pub const DEFAULT_SLOT: &str = "skl_database";

/// Appended to the slot name when an unreadable store is set aside.
pub const BACKUP_SUFFIX: &str = ".corrupt";

/// How the store came up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was persisted yet.
    Fresh,
    /// Persisted records were read. `repaired` counts entries that needed a new identifier.
    Loaded { count: usize, repaired: usize },
    /// Persisted data could not be read; the store started empty.
    Recovered {
        reason: String,
        backup_slot: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: RecordId,
    pub created: bool,
}

/// Reads the record sequence from `slot`. Never fails.
///
/// Missing data yields an empty sequence. Unreadable data yields an empty
/// sequence too, with a warning, and the raw content is copied to
/// `<slot>.corrupt` so a later write cannot destroy it.
pub fn load<B: StorageBackend>(backend: &B, slot: &str) -> (Vec<Record>, LoadStatus) {
    let raw = match backend.read_slot(slot) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return (Vec::new(), LoadStatus::Fresh),
        Err(e) => {
            tracing::warn!(slot, error = %e, "could not read record store, starting empty");
            return (
                Vec::new(),
                LoadStatus::Recovered {
                    reason: e.to_string(),
                    backup_slot: None,
                },
            );
        }
    };

    match serde_json::from_str::<Vec<Record>>(&raw) {
        Ok(records) => {
            let (records, repaired) = repair_identifiers(records);
            let count = records.len();
            (records, LoadStatus::Loaded { count, repaired })
        }
        Err(e) => {
            tracing::warn!(slot, error = %e, "record store is corrupt, starting empty");
            let backup = format!("{}{}", slot, BACKUP_SUFFIX);
            let backup_slot = match backend.write_slot(&backup, &raw) {
                Ok(()) => Some(backup),
                Err(err) => {
                    tracing::warn!(slot = %backup, error = %err, "could not back up corrupt record store");
                    None
                }
            };
            (
                Vec::new(),
                LoadStatus::Recovered {
                    reason: e.to_string(),
                    backup_slot,
                },
            )
        }
    }
}

/// Gives every record a unique, non-blank identifier.
fn repair_identifiers(mut records: Vec<Record>) -> (Vec<Record>, usize) {
    let mut seen = HashSet::new();
    let mut repaired = 0;
    for record in records.iter_mut() {
        let usable = record
            .id
            .as_ref()
            .is_some_and(|id| !id.is_blank() && !seen.contains(id));
        if !usable {
            let mut id = RecordId::generate();
            while seen.contains(&id) {
                id = RecordId::generate();
            }
            tracing::warn!(old = ?record.id, new = %id, "assigned identifier to stored record");
            record.id = Some(id);
            repaired += 1;
        }
        if let Some(id) = &record.id {
            seen.insert(id.clone());
        }
    }
    (records, repaired)
}

/// The saved records, newest first.
///
/// Mutations go through [`RecordStore::upsert`] and [`RecordStore::remove`];
/// each one commits the full sequence to the backend. If the commit fails the
/// in-memory change is rolled back, so memory never runs ahead of storage.
///
/// An empty sequence is only ever written when an explicit delete emptied the
/// store. A store that is empty because loading failed never overwrites what
/// is on disk.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    slot: String,
    records: Vec<Record>,
    status: LoadStatus,
    emptied_by_delete: bool,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn open(backend: B, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let (records, status) = load(&backend, &slot);
        let store = Self {
            backend,
            slot,
            records,
            status,
            emptied_by_delete: false,
        };

        if let LoadStatus::Loaded { repaired, .. } = &store.status {
            if *repaired > 0 {
                if let Err(e) = store.persist() {
                    tracing::warn!(error = %e, "could not write back repaired identifiers");
                }
            }
        }
        store
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id.as_ref() == Some(id))
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id.as_ref() == Some(id))
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replaces the entry with the same identifier in place, or inserts the
    /// record at the front under a newly generated identifier.
    ///
    /// A record whose identifier is unknown to the store is treated as new.
    pub fn upsert(&mut self, mut record: Record) -> Result<UpsertOutcome> {
        let existing = record
            .id
            .clone()
            .and_then(|id| self.position(&id).map(|pos| (id, pos)));

        if let Some((id, pos)) = existing {
            let previous = std::mem::replace(&mut self.records[pos], record);
            if let Err(e) = self.commit() {
                self.records[pos] = previous;
                return Err(e);
            }
            return Ok(UpsertOutcome { id, created: false });
        }

        let id = self.fresh_id();
        record.id = Some(id.clone());
        self.records.insert(0, record);
        self.emptied_by_delete = false;
        if let Err(e) = self.commit() {
            self.records.remove(0);
            return Err(e);
        }
        Ok(UpsertOutcome { id, created: true })
    }

    /// Deletes the matching entry. Returns `None` (and writes nothing) when absent.
    pub fn remove(&mut self, id: &RecordId) -> Result<Option<Record>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let removed = self.records.remove(pos);
        let was_emptied = self.emptied_by_delete;
        self.emptied_by_delete = self.records.is_empty();
        if let Err(e) = self.commit() {
            self.records.insert(pos, removed);
            self.emptied_by_delete = was_emptied;
            return Err(e);
        }
        Ok(Some(removed))
    }

    /// Writes the full sequence to the backend, replacing prior content.
    ///
    /// This is the raw write. Mutations call it through the empty-store guard.
    pub fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.records)?;
        self.backend.write_slot(&self.slot, &content)?;
        tracing::debug!(slot = %self.slot, records = self.records.len(), "record store committed");
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        if self.records.is_empty() && !self.emptied_by_delete {
            tracing::debug!(slot = %self.slot, "skipping write of empty record store");
            return Ok(());
        }
        self.persist()
    }

    fn fresh_id(&self) -> RecordId {
        let mut id = RecordId::generate();
        while self.position(&id).is_some() {
            id = RecordId::generate();
        }
        id
    }
}
