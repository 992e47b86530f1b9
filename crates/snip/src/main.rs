//! # Snip CLI Architecture
//!
//! The binary is thin: the CLI lives in `src/cli/`, this file only invokes
//! `cli::run()` and turns its outcome into a process exit code.
//!
//! ## Workspace Structure
//!
//! - `crates/snipapp/`: UI-agnostic library (storage, id sequence, accounts, API facade)
//! - `crates/snip/`: This CLI tool, one client of that library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/snip/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Session file load/save (session_file.rs)                 │
//! │  - Request dispatch + redirect following (commands.rs)      │
//! │  - Terminal rendering via minijinja templates (render.rs)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/snipapp/src/api.rs)                      │
//! │  - One method per route, authorization gate                 │
//! │  - Returns a view to render or a route to redirect to       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every invocation is one "request": load the session, call the API, follow any
//! redirect with a GET, render the final view (consuming the flash), save the session.
//!
//! ## Rendering
//!
//! Templates live in `src/cli/templates/*.jinja` and are embedded at compile time via
//! `include_str!()`, so the binary is self-contained and layout changes stay in the
//! template files.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
