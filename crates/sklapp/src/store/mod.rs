//! # Storage Layer
//!
//! Saved certificates live in a single named slot as a JSON array, newest
//! first. [`RecordStore`] owns that array in memory and is the only thing that
//! writes it back.
//!
//! ## Commit Rules
//!
//! - Loaded once at open. Missing data is a fresh store; unreadable data is
//!   logged, backed up to `<slot>.corrupt`, and the store starts empty.
//! - Every insert, update or delete commits the whole array.
//! - An empty array is written only when a delete removed the last record,
//!   never because a load came back empty.
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: one `<slot>.json` file per slot, atomic writes.
//! - [`mem_backend::MemBackend`]: for tests, with write counting and
//!   simulated failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── skl_database.json          # Saved records
//! ├── skl_database.corrupt.json  # Only after an unreadable load
//! ├── skl_draft.json             # CLI checkpoint of the active document
//! └── skl.toml                   # Optional configuration
//! ```

pub mod backend;
pub mod draft;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use record_store::{LoadStatus, RecordStore, UpsertOutcome, BACKUP_SUFFIX, DEFAULT_SLOT};
