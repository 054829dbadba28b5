//! # Command Layer
//!
//! The **business logic** of skl. Each operation lives in its own submodule as
//! plain functions over a [`RecordStore`](crate::store::RecordStore) and an
//! [`ActiveDocument`].
//!
//! Commands:
//! - Decide insert versus update, reset the document after deletes, overlay
//!   assist proposals
//! - Return structured [`CmdResult`] values with leveled messages
//! - Never print, prompt or exit
//!
//! Confirmation for destructive actions is the client's job. Commands that
//! need one come in pairs (`preview` then `run`, see [`delete`]).
//!
//! ## Testing
//!
//! Most tests live here, against [`MemBackend`](crate::store::mem_backend::MemBackend).
//!
//! ## Command Modules
//!
//! - [`save`]: Insert or update the active document
//! - [`select`]: Load a stored record for editing
//! - [`delete`]: Remove a stored record
//! - [`new_document`]: Start over with an empty document
//! - [`edit`]: Field edits and roster assignment
//! - [`list`]: Stored records with positions
//! - [`assist`]: Overlay a text-assist proposal
//! - [`helpers`]: Selector resolution

use crate::document::{ActiveDocument, OverlayReport};
use crate::model::Record;
use serde::Serialize;

pub mod assist;
pub mod delete;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod new_document;
pub mod save;
pub mod select;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A stored record with its 1-based list position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedRecord {
    pub position: usize,
    /// True when this record is the one loaded in the active document.
    pub is_active: bool,
    pub record: Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Created,
    Updated,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<ListedRecord>,
    pub listed_records: Vec<ListedRecord>,
    /// Snapshot of the active document after the command.
    pub document: Option<ActiveDocument>,
    pub outcome: Option<SaveOutcome>,
    pub overlay: Option<OverlayReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<ListedRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<ListedRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_document(mut self, doc: &ActiveDocument) -> Self {
        self.document = Some(doc.clone());
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
