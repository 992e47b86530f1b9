use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snip",
    bin_name = "snip",
    version,
    disable_help_subcommand = true,
    after_help = "Running `snip` with no command lists all code snippets."
)]
#[command(about = "Numbered code snippets, editable only by their owner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides SNIP_DATA_DIR and the config file)
    #[arg(long, global = true, help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file to read instead of the default snip.toml
    #[arg(long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Session file for this client (overrides SNIP_SESSION_FILE and the config file)
    #[arg(long, global = true, help_heading = "Options")]
    pub session: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List code snippets, ordered by value
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only snippets owned by this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show one code snippet
    #[command(alias = "v", display_order = 2)]
    Show { id: u64 },

    /// Save a new code snippet (reads stdin when no value is given)
    #[command(alias = "n", display_order = 3)]
    New { value: Option<String> },

    /// Replace the value of one of your code snippets
    #[command(alias = "e", display_order = 4)]
    Update { id: u64, value: String },

    /// Delete one of your code snippets
    #[command(alias = "rm", display_order = 5)]
    Delete { id: u64 },

    /// Create an account and log in
    #[command(display_order = 10)]
    Register {
        username: String,

        #[arg(short, long)]
        password: String,

        /// Repeat the password (defaults to --password)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Log in
    #[command(display_order = 11)]
    Login {
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Log out
    #[command(display_order = 12)]
    Logout,

    /// Request any route by path, e.g. `snip get /update/3`
    #[command(display_order = 20)]
    Get { path: String },

    /// Delete all snippets and accounts (needs allow_maintenance)
    #[command(display_order = 21)]
    Clear,
}
