use super::ListedRecord;
use crate::document::ActiveDocument;
use crate::model::{Record, RecordId};
use crate::store::{RecordStore, StorageBackend};
use std::fmt;
use std::str::FromStr;

/// How a client names a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// 1-based position in the list, newest first.
    Position(usize),
    Id(RecordId),
    /// A bare number: the record with exactly this identifier if one exists,
    /// otherwise the record at this position.
    Number { id: RecordId, position: usize },
}

impl RecordSelector {
    /// `#N` is always a position, a bare number is tried as an identifier
    /// first, anything else is an identifier.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(n) = raw.strip_prefix('#').and_then(|n| n.parse::<usize>().ok()) {
            return RecordSelector::Position(n);
        }
        match raw.parse::<usize>() {
            Ok(position) => RecordSelector::Number {
                id: RecordId::new(raw),
                position,
            },
            Err(_) => RecordSelector::Id(RecordId::new(raw)),
        }
    }
}

impl FromStr for RecordSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Position(n) | RecordSelector::Number { position: n, .. } => {
                write!(f, "#{}", n)
            }
            RecordSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl From<RecordId> for RecordSelector {
    fn from(id: RecordId) -> Self {
        RecordSelector::Id(id)
    }
}

/// Resolves a selector to a stored identifier. `None` when nothing matches.
pub fn resolve<B: StorageBackend>(store: &RecordStore<B>, selector: &RecordSelector) -> Option<RecordId> {
    match selector {
        RecordSelector::Position(0) => None,
        RecordSelector::Position(n) => store.records().get(n - 1).and_then(|r| r.id.clone()),
        RecordSelector::Id(id) => store.get(id).and_then(|r| r.id.clone()),
        RecordSelector::Number { id, position } => store
            .get(id)
            .and_then(|r| r.id.clone())
            .or_else(|| resolve(store, &RecordSelector::Position(*position))),
    }
}

pub fn listed<B: StorageBackend>(
    store: &RecordStore<B>,
    doc: &ActiveDocument,
    id: &RecordId,
) -> Option<ListedRecord> {
    let pos = store.position(id)?;
    Some(listed_at(pos, &store.records()[pos], doc))
}

pub fn listed_at(index: usize, record: &Record, doc: &ActiveDocument) -> ListedRecord {
    ListedRecord {
        position: index + 1,
        is_active: record.id.is_some() && record.id.as_ref() == doc.id(),
        record: record.clone(),
    }
}

/// Short human label for messages.
pub fn describe(record: &Record) -> String {
    match record.display_name() {
        Some(name) => name.to_string(),
        None => "(tanpa nama)".to_string(),
    }
}
