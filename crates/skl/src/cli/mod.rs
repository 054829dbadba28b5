//! # CLI Behavior
//!
//! This is **one possible UI client** for sklapp. It is the only place that
//! knows about terminal I/O, prompts and exit codes.
//!
//! ## Naked Execution
//!
//! `skl` with no subcommand shows the status of the active document.
//!
//! ## Confirmation
//!
//! Deleting a record, and replacing a document with unsaved edits (`new`,
//! `edit`), ask first. `--yes` skips the question. Without a terminal to ask
//! on, the answer is no and nothing changes.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Logging, context, dispatch
//! - `handlers`: One function per subcommand
//! - `render`: Output through templates
//! - `styles`: Terminal styles
//! - `templates`: Embedded template sources

mod commands;
mod handlers;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
