//! # CLI Layer
//!
//! This module is **one possible UI client** for snip, it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Decides process exit codes
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Request Flow
//!
//! 1. **Context Setup**: config, logging, data directory, store, API
//! 2. **Session**: loaded from this client's session file (anonymous if missing or expired)
//! 3. **Dispatch**: the subcommand becomes one API call
//! 4. **Redirects**: followed with GETs, carrying the session along
//! 5. **Output**: the final view is rendered with the flash taken from the session
//! 6. **Persist**: the session is saved, which also refreshes its expiry
//!
//! Failures the API does not recover (storage errors, refused access, unknown routes)
//! render the error view on stderr and exit non-zero.

use super::render::Renderer;
use super::session_file::SessionFile;
use super::setup::{Cli, Commands};
use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use console::Term;
use snipapp::api::{Response, Route, SnipsApi, View};
use snipapp::config::SnipConfig;
use snipapp::error::{ErrorKind, SnipError};
use snipapp::session::Session;
use snipapp::store::fs::FileStore;
use snipapp::store::DataStore;
use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Upper bound on redirects followed for one request.
const MAX_REDIRECTS: usize = 8;

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = SnipConfig::load(cli.config.as_deref())?;
    let data_dir = config.resolve_data_dir(cli.data.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let api = SnipsApi::new(FileStore::new(data_dir.clone()))
        .with_maintenance(config.allow_maintenance);
    let session_path = config.resolve_session_file(cli.session.as_deref(), &data_dir)?;
    tracing::debug!(session = %session_path.display(), "using session file");
    let session_file = SessionFile::new(session_path, config.session_ttl_hours);
    let mut session = session_file.load(Utc::now());

    let command = cli.command.unwrap_or(Commands::List { user: None });
    let outcome = dispatch(&api, &mut session, command)
        .and_then(|response| follow_redirects(&api, &mut session, response));

    let use_color = Term::stdout().features().colors_supported();
    let renderer = Renderer::new(use_color)?;
    let status = match outcome {
        Ok(view) => {
            let flash = session.take_flash();
            let output = renderer.render(&view, flash.as_ref(), session.user())?;
            println!("{}", output.trim_end());
            0
        }
        Err(err) => {
            tracing::debug!(error = %err, kind = ?err.kind(), "request failed");
            let view = SnipsApi::<FileStore>::error_view(&err);
            let output = renderer.render(&view, None, session.user())?;
            eprintln!("{}", output.trim_end());
            exit_status(&err)
        }
    };

    match session_file.save(&session, Utc::now()) {
        Ok(()) => {}
        // the request already failed, its error view is what the user needs
        Err(e) if status != 0 => tracing::warn!(error = %e, "session not saved"),
        Err(e) => return Err(e),
    }
    Ok(ExitCode::from(status))
}

/// Logging to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

fn dispatch<S: DataStore>(
    api: &SnipsApi<S>,
    session: &mut Session,
    command: Commands,
) -> snipapp::error::Result<Response> {
    match command {
        Commands::List { user } => api.all(session, user.as_deref()),
        Commands::Show { id } => api.show(session, id),
        Commands::New { value } => {
            let value = match value {
                Some(value) => value,
                None => read_stdin()?,
            };
            api.create(session, value)
        }
        Commands::Update { id, value } => api.update(session, id, value),
        Commands::Delete { id } => api.delete(session, id),
        Commands::Register {
            username,
            password,
            confirm,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            api.register(session, &username, &password, &confirm)
        }
        Commands::Login { username, password } => api.login(session, &username, &password),
        Commands::Logout => api.logout(session),
        Commands::Get { path } => {
            let route = Route::parse(&path)?;
            api.get(session, route)
        }
        Commands::Clear => api.clear(session),
    }
}

fn follow_redirects<S: DataStore>(
    api: &SnipsApi<S>,
    session: &mut Session,
    response: Response,
) -> snipapp::error::Result<View> {
    redirect_chain(session, response, |session, route| api.get(session, route))
}

/// Resolves `response` to a view, fetching each redirect target with `get`.
fn redirect_chain(
    session: &mut Session,
    response: Response,
    mut get: impl FnMut(&mut Session, Route) -> snipapp::error::Result<Response>,
) -> snipapp::error::Result<View> {
    let mut response = response;
    for _ in 0..MAX_REDIRECTS {
        match response {
            Response::Render(view) => return Ok(view),
            Response::Redirect(route) => {
                tracing::debug!(route = %route, "following redirect");
                response = get(session, route)?;
            }
        }
    }
    Err(SnipError::Internal("Too many redirects".to_string()))
}

/// The snippet value for `snip new` without an argument.
fn read_stdin() -> snipapp::error::Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(SnipError::Validation(
            "The code snippet value is required.".to_string(),
        ));
    }
    let mut value = String::new();
    stdin.read_to_string(&mut value)?;
    Ok(value.trim_end_matches(['\n', '\r']).to_string())
}

/// 2 for storage failures, 1 for everything else.
fn exit_status(err: &SnipError) -> u8 {
    match err.kind() {
        ErrorKind::StorageUnavailable => 2,
        _ => 1,
    }
}
