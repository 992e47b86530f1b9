//! # CLI Behavior
//!
//! This is **one possible UI client** for snip, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`snip`)
//!
//! Running `snip` with no subcommand lists every snippet, the same as `snip list`.
//!
//! ## Creating From Stdin
//!
//! `snip new "print(1)"` saves its argument. Without an argument the value is read
//! from stdin, so `cat script.py | snip new` works.
//!
//! ## Logging In
//!
//! `snip login` stores the session in this client's own session file, one per data
//! directory, so people sharing a data directory keep separate logins. `--session`
//! picks another file. A login lasts `session_ttl_hours` (24 by default) and is
//! refreshed by every command.
//!
//! ## Module Structure
//!
//! - `commands`: Request flow, dispatch to the API, redirect following
//! - `render`: Template environment and view rendering
//! - `session_file`: Session persistence with expiry
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling

mod commands;
mod render;
mod session_file;
pub mod setup;
mod styles;

pub use commands::run;
