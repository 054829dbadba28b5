//! # Text Assist
//!
//! A collaborator that reads free-text notes ("bayi perempuan lahir senin jam
//! 8 pagi, berat 3200 g, ibu Siti…") and proposes field values.
//!
//! The core only depends on the [`TextAssist`] contract: text in, a partial
//! field mapping or a failure out. Transport, prompt and schema belong to the
//! implementation ([`gemini::GeminiAssist`]).
//!
//! ## One Request at a Time
//!
//! [`AssistGate`] hands out a single [`AssistTicket`]; a second `begin` while
//! one is outstanding fails with [`SklError::AssistBusy`]. Every ticket carries
//! its own sequence number and cannot be copied, so only the outstanding
//! request can release the gate. The ticket also remembers the document
//! generation, so a response that arrives after the user switched documents is
//! dropped instead of overwriting newer work.

use crate::document::ActiveDocument;
use crate::error::{Result, SklError};
use crate::model::Field;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod gemini;

/// Field values proposed for the active document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proposal {
    values: BTreeMap<Field, String>,
}

impl Proposal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Builds a proposal from a JSON object keyed by field name.
    ///
    /// Unknown keys (including `id`) and nulls are ignored; numbers are taken
    /// as their decimal text.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| SklError::Assist("expected a JSON object".to_string()))?;

        let mut proposal = Proposal::new();
        for (key, raw) in object {
            let Ok(field) = key.parse::<Field>() else {
                tracing::debug!(key = %key, "ignoring unknown key in proposal");
                continue;
            };
            match raw {
                Value::String(s) => proposal.insert(field, s.clone()),
                Value::Number(n) => proposal.insert(field, n.to_string()),
                Value::Null => {}
                other => tracing::debug!(key = %key, value = %other, "ignoring non-text value in proposal"),
            }
        }
        Ok(proposal)
    }

    /// Parses model output, tolerating a Markdown code fence around the JSON.
    pub fn from_json_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .and_then(|rest| rest.trim_end().strip_suffix("```"))
            .unwrap_or(trimmed);
        let value: Value = serde_json::from_str(body.trim())
            .map_err(|e| SklError::Assist(format!("response is not valid JSON: {}", e)))?;
        Self::from_json(&value)
    }
}

/// Proposes field values for a free-text note.
pub trait TextAssist {
    fn propose(&self, free_text: &str) -> Result<Proposal>;
}

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one outstanding assist request. Not `Clone`: the holder is the
/// only party that can complete the request.
#[derive(Debug, PartialEq, Eq)]
pub struct AssistTicket {
    seq: u64,
    generation: u64,
}

impl AssistTicket {
    /// Generation of the document the request was made for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Allows at most one assist request in flight.
#[derive(Debug, Default)]
pub struct AssistGate {
    in_flight: Option<u64>,
}

impl AssistGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin(&mut self, doc: &ActiveDocument) -> Result<AssistTicket> {
        if self.in_flight.is_some() {
            return Err(SklError::AssistBusy);
        }
        let seq = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.in_flight = Some(seq);
        Ok(AssistTicket {
            seq,
            generation: doc.generation(),
        })
    }

    /// Releases the gate. Returns false, and keeps the gate as it was, for a
    /// ticket that is not the outstanding one.
    pub fn finish(&mut self, ticket: &AssistTicket) -> bool {
        if self.in_flight == Some(ticket.seq) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn proposal_from_object_skips_unknown_and_null() {
        let value = json!({
            "babyName": "Aisyah",
            "weight": 3200,
            "id": "hijack",
            "mood": "happy",
            "fatherName": null,
        });
        let proposal = Proposal::from_json(&value).unwrap();

        assert_eq!(proposal.len(), 2);
        assert_eq!(proposal.get(Field::BabyName), Some("Aisyah"));
        assert_eq!(proposal.get(Field::Weight), Some("3200"));
        assert_eq!(proposal.get(Field::FatherName), None);
    }

    #[test]
    fn proposal_rejects_non_object() {
        assert!(matches!(
            Proposal::from_json(&json!(["a"])),
            Err(SklError::Assist(_))
        ));
    }

    #[test]
    fn proposal_text_accepts_code_fences() {
        let text = "```json\n{\"motherName\": \"Siti\"}\n```";
        let proposal = Proposal::from_json_text(text).unwrap();
        assert_eq!(proposal.get(Field::MotherName), Some("Siti"));
    }

    #[test]
    fn proposal_text_reports_garbage() {
        let err = Proposal::from_json_text("sorry, I can't").unwrap_err();
        assert!(matches!(err, SklError::Assist(_)));
    }

    #[test]
    fn gate_allows_one_request() {
        let doc = ActiveDocument::new();
        let mut gate = AssistGate::new();
        let ticket = gate.begin(&doc).unwrap();

        assert!(gate.is_busy());
        assert!(matches!(gate.begin(&doc), Err(SklError::AssistBusy)));

        assert!(gate.finish(&ticket));
        assert!(!gate.is_busy());
        assert!(gate.begin(&doc).is_ok());
    }

    #[test]
    fn only_the_outstanding_ticket_releases_the_gate() {
        let doc = ActiveDocument::new();
        let mut gate = AssistGate::new();
        let first = gate.begin(&doc).unwrap();
        let replay = AssistTicket {
            seq: first.seq,
            generation: first.generation,
        };
        assert!(gate.finish(&first));

        let second = gate.begin(&doc).unwrap();
        assert_ne!(second, replay);
        assert!(!gate.finish(&replay));
        assert!(gate.is_busy());
        assert!(matches!(gate.begin(&doc), Err(SklError::AssistBusy)));
        assert!(gate.finish(&second));
    }

    #[test]
    fn ticket_carries_document_generation() {
        let mut doc = ActiveDocument::new();
        doc.reset();
        let mut gate = AssistGate::new();
        let ticket = gate.begin(&doc).unwrap();
        assert_eq!(ticket.generation(), doc.generation());
    }
}
