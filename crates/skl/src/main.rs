//! # skl CLI
//!
//! The binary is thin: everything lives in `src/cli/`, and this file only calls
//! `cli::run()` and turns an error into an exit code.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/skl/src/cli/)                            │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring, logging, dispatch (commands.rs)          │
//! │  - One handler per subcommand (handlers.rs)                 │
//! │  - minijinja templates + console styles (render.rs)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/sklapp/src/api.rs)                       │
//! │  - Owns record store and active document                    │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Action per Process
//!
//! Each `skl` invocation loads the store, restores the active document from the
//! draft slot, performs one action and checkpoints the draft again. A sequence
//! like `skl set babyName=Aisyah`, `skl assistant 3`, `skl save` therefore
//! behaves like editing one form.
//!
//! ## Testing Approach
//!
//! - Business logic: unit tests in `sklapp`.
//! - Rendering: canned data through the templates (`render.rs` tests).
//! - End to end: `tests/cli_e2e.rs` runs the binary against a temp `--data` dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
