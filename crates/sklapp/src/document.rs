//! # Active Document
//!
//! The record currently being edited. It is never the same object as a stored
//! record: selecting clones out of the store, saving clones into it.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──edit──▶ Editing ──save──▶ Saved ──edit──▶ Editing ──save──▶ Saved …
//!   ▲                │                 │
//!   └──── new / reset / select ────────┘   (discards the current document)
//! ```
//!
//! The state is derived: unsaved changes make it `Editing`, an identifier
//! without pending changes makes it `Saved`, anything else is `Empty`.
//!
//! ## Generation
//!
//! Each time the document is swapped for another one (new, reset, select) the
//! generation counter moves on. Saving does not change it: a saved document is
//! still the same document. Late text-assist responses compare generations to
//! detect that the user moved on.

use crate::error::Result;
use crate::model::{Field, Record, RecordId};
use crate::roster::Assistant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentState {
    Empty,
    Editing,
    Saved,
}

/// Outcome of overlaying proposed values onto the document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverlayReport {
    pub applied: Vec<Field>,
    pub rejected: Vec<(Field, String)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDocument {
    record: Record,
    #[serde(default)]
    dirty: bool,
    #[serde(default)]
    generation: u64,
}

impl ActiveDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.record.id.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> DocumentState {
        if self.dirty {
            DocumentState::Editing
        } else if self.record.is_saved() {
            DocumentState::Saved
        } else {
            DocumentState::Empty
        }
    }

    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        self.record.set(field, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Applies proposed values field by field.
    ///
    /// Empty values are skipped, so a proposal never blanks out something the
    /// user already typed. Values an enumeration cannot parse are reported
    /// back instead of failing the whole overlay. The identifier is never
    /// touched.
    pub fn overlay<'a, I>(&mut self, values: I) -> OverlayReport
    where
        I: IntoIterator<Item = (Field, &'a str)>,
    {
        let mut report = OverlayReport::default();
        for (field, value) in values {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match self.record.set(field, value) {
                Ok(()) => report.applied.push(field),
                Err(_) => report.rejected.push((field, value.to_string())),
            }
        }
        if !report.applied.is_empty() {
            self.dirty = true;
        }
        report
    }

    pub fn apply_assistant(&mut self, assistant: &Assistant) {
        self.record.assistant_name = assistant.name.clone();
        self.record.assistant_nip = assistant.nip.clone();
        self.dirty = true;
    }

    /// Replaces the document with a copy of `record` (select for edit).
    pub fn replace(&mut self, record: &Record) {
        self.record = record.clone();
        self.dirty = false;
        self.generation += 1;
    }

    /// Starts over with an empty record.
    pub fn reset(&mut self) {
        self.record = Record::new();
        self.dirty = false;
        self.generation += 1;
    }

    /// Records that the store now holds this document under `id`.
    pub fn mark_saved(&mut self, id: RecordId, saved_at: DateTime<Utc>) {
        self.record.id = Some(id);
        self.record.saved_at = Some(saved_at);
        self.dirty = false;
    }
}
