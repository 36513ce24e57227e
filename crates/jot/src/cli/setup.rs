use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jot", bin_name = "jot", version)]
#[command(about = "Write, revise and search markdown entries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (overrides JOT_DATA and jot.toml)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a fresh entry identifier
    Id,

    /// Create an entry; markdown comes from --text or stdin
    New {
        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Markdown body (reads stdin when omitted)
        #[arg(long)]
        text: Option<String>,
    },

    /// Replace an entry's content; the previous version is archived
    Edit {
        id: String,

        /// New title (keeps the current one when omitted)
        #[arg(long)]
        title: Option<String>,

        /// Markdown body (reads stdin when omitted)
        #[arg(long)]
        text: Option<String>,
    },

    /// Show an entry
    View {
        id: String,

        /// Render the markdown to HTML
        #[arg(long)]
        html: bool,
    },

    /// List all entries, oldest first
    #[command(alias = "ls")]
    List,

    /// Print lines matching a regular expression, grouped by entry
    Search { pattern: String },

    /// List archived versions of an entry
    History { id: String },
}
