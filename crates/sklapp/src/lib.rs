//! # SKL Architecture
//!
//! `sklapp` is a **UI-agnostic library** for keeping birth certificate
//! ("Surat Keterangan Lahir") records. The `skl` terminal client is one UI on top
//! of it; a web or desktop front end would sit on the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI client (crates/skl)                                     │
//! │  - Parses input, renders output, asks for confirmation      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the RecordStore and the ActiveDocument              │
//! │  - Resolves selectors (list position or identifier)         │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - save / select / delete / new / edit / list / assist      │
//! │  - Pure logic over the store and the document               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: ordered records, explicit commits           │
//! │  - StorageBackend: named JSON slots (fs or in-memory)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward the code takes plain Rust values and returns
//! `Result<CmdResult>`. It never prints and never exits. Diagnostics go through
//! `tracing`; the client decides where they end up.
//!
//! ## The Single Writer
//!
//! Only the command layer mutates the [`store::RecordStore`], and every mutation
//! is followed by an explicit commit to the backend. The [`document::ActiveDocument`]
//! is an independent copy: selecting a record clones it, saving copies the
//! document into the store. Nothing aliases.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade (the reconciliation controller)
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Record store and storage backends
//! - [`document`]: The record being edited and its lifecycle
//! - [`model`]: Record, fields and enumerations
//! - [`assist`]: Text-assist contract and the Gemini client
//! - [`roster`]: Attending midwives
//! - [`certificate`]: The certificate as printed text
//! - [`layout`]: Page geometry and preview scaling
//! - [`config`]: Configuration
//! - [`init`]: Context setup for clients
//! - [`error`]: Error types

pub mod api;
pub mod assist;
pub mod certificate;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod init;
pub mod layout;
pub mod model;
pub mod roster;
pub mod store;
