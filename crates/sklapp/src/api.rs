//! # API Facade
//!
//! [`SklApi`] is the reconciliation controller: it owns the
//! [`RecordStore`] and the [`ActiveDocument`] and is the single entry point for
//! every operation, whatever the UI.
//!
//! The facade:
//! - **Parses selectors** (`"2"` is a list position, anything else an identifier)
//! - **Dispatches** to `commands/*.rs`
//! - **Returns** `Result<CmdResult>`
//!
//! It holds no business logic of its own and does no I/O besides what the
//! store and the draft checkpoint need.
//!
//! ## Explicit State
//!
//! Store and document are fields of the facade, not globals. Two facades over
//! two backends are fully independent, which is how the tests run.
//!
//! ## Draft Checkpoint
//!
//! A UI that lives for a whole session keeps the document in memory. A client
//! that runs one action per process enables the draft with
//! [`SklApi::with_draft`] and calls [`SklApi::checkpoint`] before exiting.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `SklApi<FsBackend>`
//! - Testing: `SklApi<MemBackend>`

use crate::assist::{AssistGate, AssistTicket, Proposal, TextAssist};
use crate::commands::{self, helpers::RecordSelector, CmdMessage, CmdResult};
use crate::document::{ActiveDocument, DocumentState};
use crate::error::{Result, SklError};
use crate::model::Record;
use crate::roster::Assistant;
use crate::store::draft::{load_draft, save_draft};
use crate::store::{LoadStatus, RecordStore, StorageBackend};

pub struct SklApi<B: StorageBackend> {
    store: RecordStore<B>,
    document: ActiveDocument,
    gate: AssistGate,
    roster: Vec<Assistant>,
    draft_slot: Option<String>,
}

impl<B: StorageBackend> SklApi<B> {
    /// Loads the store from `slot` and starts with an empty document.
    pub fn open(backend: B, slot: impl Into<String>, roster: Vec<Assistant>) -> Self {
        Self {
            store: RecordStore::open(backend, slot),
            document: ActiveDocument::new(),
            gate: AssistGate::new(),
            roster,
            draft_slot: None,
        }
    }

    /// Restores the active document from `slot` and checkpoints it there.
    pub fn with_draft(mut self, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        self.document = load_draft(self.store.backend(), &slot);
        self.draft_slot = Some(slot);
        self
    }

    pub fn document(&self) -> &ActiveDocument {
        &self.document
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.store.status()
    }

    pub fn roster(&self) -> &[Assistant] {
        &self.roster
    }

    pub fn store_location(&self) -> String {
        self.store.backend().slot_location(self.store.slot())
    }

    pub fn draft_location(&self) -> Option<String> {
        self.draft_slot
            .as_deref()
            .map(|slot| self.store.backend().slot_location(slot))
    }

    /// The document plus anything worth knowing about how the store loaded.
    pub fn status(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default().with_document(&self.document);
        match self.store.status() {
            LoadStatus::Recovered {
                reason,
                backup_slot,
            } => {
                result.add_message(CmdMessage::warning(format!(
                    "Data tersimpan tidak bisa dibaca ({}), mulai dengan daftar kosong",
                    reason
                )));
                if let Some(slot) = backup_slot {
                    result.add_message(CmdMessage::info(format!(
                        "Salinan data lama: {}",
                        self.store.backend().slot_location(slot)
                    )));
                }
            }
            LoadStatus::Loaded { repaired, .. } if *repaired > 0 => {
                result.add_message(CmdMessage::warning(format!(
                    "{} data diberi nomor identitas baru",
                    repaired
                )));
            }
            _ => {}
        }
        Ok(result)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        commands::save::run(&mut self.store, &mut self.document)
    }

    pub fn select_for_edit(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::select::run(&self.store, &mut self.document, &selector)
    }

    pub fn delete_preview(&self, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::delete::preview(&self.store, &self.document, &selector)
    }

    pub fn delete(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::delete::run(&mut self.store, &mut self.document, &selector)
    }

    pub fn new_document(&mut self) -> Result<CmdResult> {
        commands::new_document::run(&mut self.document)
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        commands::edit::set_fields(&mut self.document, &[(key.to_string(), value.to_string())])
    }

    /// Applies `KEY=VALUE` assignments, all or nothing.
    pub fn set_fields<S: AsRef<str>>(&mut self, assignments: &[S]) -> Result<CmdResult> {
        let parsed = commands::edit::parse_assignments(assignments)?;
        commands::edit::set_fields(&mut self.document, &parsed)
    }

    pub fn assign_assistant(&mut self, number: usize) -> Result<CmdResult> {
        commands::edit::assign_assistant(&mut self.document, &self.roster, number)
    }

    pub fn list(&self, search: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.store, &self.document, search)
    }

    /// A stored record by selector, or the active document when `None`.
    pub fn record(&self, selector: Option<&str>) -> Result<Record> {
        let Some(raw) = selector else {
            return Ok(self.document.record().clone());
        };
        let selector = parse_selector(raw)?;
        commands::helpers::resolve(&self.store, &selector)
            .and_then(|id| self.store.get(&id).cloned())
            .ok_or_else(|| SklError::RecordNotFound(raw.into()))
    }

    pub fn begin_assist(&mut self, free_text: &str) -> Result<AssistTicket> {
        commands::assist::begin(&mut self.gate, &self.document, free_text)
    }

    pub fn complete_assist(&mut self, ticket: AssistTicket, outcome: Result<Proposal>) -> Result<CmdResult> {
        commands::assist::complete(&mut self.gate, &mut self.document, ticket, outcome)
    }

    pub fn assist_with(&mut self, assist: &dyn TextAssist, free_text: &str) -> Result<CmdResult> {
        commands::assist::run(&mut self.gate, &mut self.document, assist, free_text)
    }

    /// Writes the active document to the draft slot, if one is enabled.
    /// A blank, unsaved document clears the slot instead.
    pub fn checkpoint(&self) -> Result<()> {
        let Some(slot) = &self.draft_slot else {
            return Ok(());
        };
        if self.document.state() == DocumentState::Empty && self.document.record().is_blank() {
            return self.store.backend().remove_slot(slot);
        }
        save_draft(self.store.backend(), slot, &self.document)
    }
}

fn parse_selector(raw: &str) -> Result<RecordSelector> {
    if raw.trim().is_empty() {
        return Err(SklError::Api("Pilih data dengan nomor urut atau ID".to_string()));
    }
    Ok(RecordSelector::parse(raw))
}
