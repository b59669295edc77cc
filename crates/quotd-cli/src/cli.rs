use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "quotd")]
#[command(about = "Manage a synced collection of quotes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a random quote from the active category filter
    Show {
        /// Category to draw from (defaults to the persisted filter)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a new quote and push it to the server when sync is configured
    #[command(alias = "new")]
    Add {
        /// Quote text
        text: Vec<String>,
        /// Category label
        #[arg(short, long)]
        category: String,
    },
    /// List quotes
    List {
        /// Filter by category ("all" for everything)
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set and persist the active category filter
    Filter {
        /// Category name, or "all" for no filter
        category: String,
    },
    /// Import quotes from a JSON file
    Import {
        /// Path to a JSON array of {text, category} objects
        path: PathBuf,
        /// Reject invalid entries and drop text duplicates
        #[arg(long)]
        strict: bool,
    },
    /// Export quotes to a JSON file
    Export {
        /// Output path (default: quotes.json)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Run one sync cycle against the configured server
    Sync,
    /// Sync on a fixed interval until interrupted
    Watch {
        /// Seconds between sync cycles (default: 30)
        #[arg(long, value_name = "SECONDS")]
        interval_secs: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
