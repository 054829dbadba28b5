use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Version string, with the git hash for builds made from a checkout.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} ({})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "skl",
    bin_name = "skl",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Typical session:\n  skl set babyName=\"Aisyah\" motherName=\"Siti\" gender=P weight=3200\n  skl assistant 3\n  skl save\n  skl print --output skl.html"
)]
#[command(about = "Fill, keep and print birth certificates (Surat Keterangan Lahir)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides SKL_DATA and the platform default)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Plain output without colours
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the form being edited (default)
    #[command(alias = "st", display_order = 1)]
    Status,

    /// Start a new, empty form
    #[command(display_order = 2)]
    New {
        /// Discard unsaved edits without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Set fields on the form: KEY=VALUE ...
    #[command(display_order = 3)]
    Set {
        /// e.g. babyName="Aisyah" gender=P weight=3200
        #[arg(required = true, num_args = 1.., value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },

    /// List field keys, labels and current values
    #[command(display_order = 4)]
    Fields,

    /// List attending midwives, or pick one by number
    #[command(alias = "penolong", display_order = 5)]
    Assistant {
        /// Roster number
        number: Option<usize>,
    },

    /// Ask the text assistant to fill fields from a free-text note
    #[command(display_order = 6)]
    Assist {
        /// The note, e.g. "bayi perempuan lahir senin jam 08.15 berat 3200 gram"
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Save the form (new record, or update of the one being edited)
    #[command(display_order = 7)]
    Save,

    /// List saved records
    #[command(alias = "ls", display_order = 10)]
    List {
        /// Match baby or mother name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Load a saved record into the form
    #[command(display_order = 11)]
    Edit {
        /// List number, #N, or record ID
        selector: String,

        /// Discard unsaved edits without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a saved record
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// List number, #N, or record ID
        selector: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Preview the certificate in the terminal
    #[command(alias = "preview", display_order = 20)]
    Show {
        /// List number, #N, or record ID (default: the form)
        selector: Option<String>,
    },

    /// Write the certificate as a printable A4 HTML page
    #[command(display_order = 21)]
    Print {
        /// List number, #N, or record ID (default: the form)
        selector: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Scale the on-screen page for a viewport this many pixels wide
        #[arg(long, value_name = "PX")]
        fit: Option<u32>,
    },

    /// Show where data and configuration live
    #[command(display_order = 30)]
    Paths,

    /// Show resolved configuration
    #[command(display_order = 31)]
    Config {
        /// Print a commented skl.toml template instead
        #[arg(long)]
        template: bool,
    },
}

impl Commands {
    /// Whether the active document may change, so the draft must be written back.
    pub fn touches_document(&self) -> bool {
        match self {
            Commands::New { .. }
            | Commands::Set { .. }
            | Commands::Assist { .. }
            | Commands::Save
            | Commands::Edit { .. }
            | Commands::Delete { .. } => true,
            Commands::Assistant { number } => number.is_some(),
            Commands::Status
            | Commands::Fields
            | Commands::List { .. }
            | Commands::Show { .. }
            | Commands::Print { .. }
            | Commands::Paths
            | Commands::Config { .. } => false,
        }
    }
}
