//! # CLI Layer
//!
//! This module is **one possible UI client** for sklapp, not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Sets up logging
//! - Parses arguments
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap turns shell arguments into [`Commands`]
//! 2. **Context Setup**: `sklapp::init::initialize` loads config, store and draft
//! 3. **Dispatch**: one handler per subcommand
//! 4. **Checkpoint**: commands that touch the active document write the draft back

use super::handlers::{self, AppState};
use super::render::Renderer;
use super::setup::{Cli, Commands};
use clap::Parser;
use console::Term;
use sklapp::config::SklConfig;
use sklapp::error::Result;
use sklapp::init::initialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log filter directives, e.g. `SKL_LOG=sklapp=debug`.
pub const LOG_ENV: &str = "SKL_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Needs no store or config files.
    if let Some(Commands::Config { template: true }) = &cli.command {
        print!("{}", SklConfig::template());
        return Ok(());
    }

    let use_color = !cli.no_color && Term::stdout().features().colors_supported();
    let ctx = initialize(cli.data.as_deref())?;
    let mut state = AppState::new(ctx, Renderer::new(use_color)?);

    let command = cli.command.unwrap_or(Commands::Status);
    let checkpoint = command.touches_document();
    dispatch(&mut state, command)?;

    if checkpoint {
        state.ctx.api.checkpoint()?;
    }
    Ok(())
}

fn dispatch(state: &mut AppState, command: Commands) -> Result<()> {
    match command {
        Commands::Status => handlers::status(state),
        Commands::New { yes } => handlers::new_document(state, yes),
        Commands::Set { assignments } => handlers::set(state, &assignments),
        Commands::Fields => handlers::fields(state),
        Commands::Assistant { number } => handlers::assistant(state, number),
        Commands::Assist { text } => handlers::assist(state, &text.join(" ")),
        Commands::Save => handlers::save(state),
        Commands::List { search } => handlers::list(state, search.as_deref()),
        Commands::Edit { selector, yes } => handlers::edit(state, &selector, yes),
        Commands::Delete { selector, yes } => handlers::delete(state, &selector, yes),
        Commands::Show { selector } => handlers::show(state, selector.as_deref()),
        Commands::Print {
            selector,
            output,
            fit,
        } => handlers::print(state, selector.as_deref(), output.as_deref(), fit),
        Commands::Paths => handlers::paths(state),
        Commands::Config { .. } => handlers::config(state),
    }
}

/// Diagnostics go to stderr so they never mix with rendered output.
/// `--verbose` wins over `SKL_LOG`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
