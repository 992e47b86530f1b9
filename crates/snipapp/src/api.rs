//! # API Facade
//!
//! The API layer is the **Application Service**: the single entry point a client
//! (the CLI, a web frontend) talks to. It mirrors the routing surface, one method
//! per form (GET) and per submission (POST).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Gates** new/update/delete behind an authenticated [`Session`]
//! - **Dispatches** to the command functions
//! - **Recovers** validation, ownership, not-found and credential failures into a
//!   fail flash plus a redirect (or a re-rendered form that keeps the submitted value)
//! - **Propagates** storage failures and gate refusals as `Err`, for the client to
//!   show via [`SnipsApi::error_view`]
//!
//! ## Responses
//!
//! Every call returns a [`Response`]: either a [`View`] to render or a [`Route`] to
//! redirect to. A client follows a redirect by calling [`SnipsApi::get`] with the
//! same session, which is how a flash set by a POST reaches the next rendered view.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Rendering**: Views are data; templates live in the client
//! - **Session persistence**: The client loads and saves the session around each call
//!
//! ## Maintenance Route
//!
//! `/clear` wipes every user and snippet. It only exists when the API is built with
//! [`SnipsApi::with_maintenance`]`(true)` and even then needs a logged-in session.
//! Otherwise it answers like any unknown route.

use crate::commands::{self, CmdResult, ListedSnippet};
use crate::error::{Result, SnipError};
use crate::session::{Flash, Session};
use crate::store::DataStore;
use serde::Serialize;
use std::fmt;

const NO_SUCH_SNIPPET: &str = "No code snippet with that ID exists.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    All,
    New,
    Update(Option<u64>),
    Delete(Option<u64>),
    Register,
    Login,
    Logout,
    Clear,
}

impl Route {
    /// Maps a request path to a route. Anything unknown is `NotFound`.
    pub fn parse(path: &str) -> Result<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        let mut parts = trimmed.trim_start_matches('/').splitn(2, '/');
        let head = parts.next().unwrap_or_default();
        let tail = parts.next();

        let id = |tail: Option<&str>| -> Result<Option<u64>> {
            match tail {
                None => Ok(None),
                Some(raw) => raw.parse::<u64>().map(Some).map_err(|_| not_found_route()),
            }
        };

        match (head, tail) {
            ("", None) => Ok(Route::Index),
            ("all", None) => Ok(Route::All),
            ("new", None) => Ok(Route::New),
            ("update", tail) => Ok(Route::Update(id(tail)?)),
            ("delete", tail) => Ok(Route::Delete(id(tail)?)),
            ("register", None) => Ok(Route::Register),
            ("login", None) => Ok(Route::Login),
            ("logout", None) => Ok(Route::Logout),
            ("clear", None) => Ok(Route::Clear),
            _ => Err(not_found_route()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::All => "/all".to_string(),
            Route::New => "/new".to_string(),
            Route::Update(None) => "/update".to_string(),
            Route::Update(Some(id)) => format!("/update/{}", id),
            Route::Delete(None) => "/delete".to_string(),
            Route::Delete(Some(id)) => format!("/delete/{}", id),
            Route::Register => "/register".to_string(),
            Route::Login => "/login".to_string(),
            Route::Logout => "/logout".to_string(),
            Route::Clear => "/clear".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn not_found_route() -> SnipError {
    SnipError::NotFound("Not Found".to_string())
}

/// A snippet loaded into the update or delete form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetForm {
    pub id: u64,
    pub value: String,
    pub owner: String,
}

impl From<ListedSnippet> for SnippetForm {
    fn from(listed: ListedSnippet) -> Self {
        Self {
            id: listed.id,
            value: listed.value,
            owner: listed.owner,
        }
    }
}

/// A named view and its view-model.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Index,
    All {
        snippets: Vec<ListedSnippet>,
        filter: Option<String>,
    },
    Snippet {
        snippet: ListedSnippet,
    },
    /// `value` holds a rejected submission so the user can fix it.
    New {
        value: Option<String>,
    },
    /// Without a form the view asks which id to update.
    Update {
        form: Option<SnippetForm>,
    },
    Delete {
        form: Option<SnippetForm>,
    },
    Register {
        username: Option<String>,
    },
    Login {
        username: Option<String>,
    },
    Logout,
    Error {
        status: u16,
        message: String,
    },
}

impl View {
    /// Template name for this view.
    pub fn name(&self) -> &'static str {
        match self {
            View::Index => "index",
            View::All { .. } => "all",
            View::Snippet { .. } => "snippet",
            View::New { .. } => "new",
            View::Update { .. } => "update",
            View::Delete { .. } => "delete",
            View::Register { .. } => "register",
            View::Login { .. } => "login",
            View::Logout => "logout",
            View::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Response {
    Render(View),
    Redirect(Route),
}

/// The main API facade for snip operations.
///
/// Generic over `DataStore` to allow different storage backends.
pub struct SnipsApi<S: DataStore> {
    store: S,
    allow_maintenance: bool,
}

impl<S: DataStore> SnipsApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            allow_maintenance: false,
        }
    }

    pub fn with_maintenance(mut self, allow: bool) -> Self {
        self.allow_maintenance = allow;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The error page for a failure that was not recovered.
    pub fn error_view(err: &SnipError) -> View {
        View::Error {
            status: err.status(),
            message: err.to_string(),
        }
    }

    /// Serve a GET for `route`. Used to follow redirects.
    pub fn get(&self, session: &mut Session, route: Route) -> Result<Response> {
        tracing::debug!(route = %route, user = ?session.user(), "GET");
        match route {
            Route::Index => self.index(session),
            Route::All => self.all(session, None),
            Route::New => self.new_form(session),
            Route::Update(id) => self.update_form(session, id),
            Route::Delete(id) => self.delete_form(session, id),
            Route::Register => self.register_form(session),
            Route::Login => self.login_form(session),
            Route::Logout => self.logout_form(session),
            Route::Clear => self.clear(session),
        }
    }

    pub fn index(&self, _session: &mut Session) -> Result<Response> {
        Ok(Response::Render(View::Index))
    }

    /// All snippets, optionally only those owned by `filter`.
    pub fn all(&self, _session: &mut Session, filter: Option<&str>) -> Result<Response> {
        let result = commands::list::run(&self.store, filter)?;
        Ok(Response::Render(View::All {
            snippets: result.listed_snippets,
            filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
        }))
    }

    pub fn show(&self, session: &mut Session, id: u64) -> Result<Response> {
        match commands::get::run(&self.store, id) {
            Ok(mut result) => match result.listed_snippets.pop() {
                Some(snippet) => Ok(Response::Render(View::Snippet { snippet })),
                None => Err(SnipError::NotFound(NO_SUCH_SNIPPET.to_string())),
            },
            Err(e) if e.is_recoverable() => {
                session.set_flash(Flash::fail(NO_SUCH_SNIPPET));
                Ok(Response::Redirect(Route::All))
            }
            Err(e) => Err(e),
        }
    }

    pub fn new_form(&self, session: &mut Session) -> Result<Response> {
        authorize(session)?;
        Ok(Response::Render(View::New { value: None }))
    }

    pub fn create(&self, session: &mut Session, value: String) -> Result<Response> {
        let user = authorize(session)?.to_string();
        match commands::create::run(&self.store, Some(&user), value.clone()) {
            Ok(result) => {
                flash_success(session, &result);
                Ok(Response::Redirect(Route::New))
            }
            Err(e) if e.is_recoverable() => {
                session.set_flash(Flash::fail(e.to_string()));
                Ok(Response::Render(View::New { value: Some(value) }))
            }
            Err(e) => Err(e),
        }
    }

    pub fn update_form(&self, session: &mut Session, id: Option<u64>) -> Result<Response> {
        authorize(session)?;
        self.snippet_form(session, id, Route::Update(None), |form| View::Update {
            form,
        })
    }

    pub fn update(&self, session: &mut Session, id: u64, value: String) -> Result<Response> {
        let user = authorize(session)?.to_string();
        match commands::update::run(&self.store, Some(&user), id, value.clone()) {
            Ok(result) => {
                flash_success(session, &result);
                Ok(Response::Redirect(Route::Update(Some(id))))
            }
            Err(e @ SnipError::NotFound(_)) => {
                tracing::debug!(id, error = %e, "update of missing snippet");
                session.set_flash(Flash::fail(NO_SUCH_SNIPPET));
                Ok(Response::Redirect(Route::Update(None)))
            }
            Err(e @ SnipError::Forbidden(_)) => {
                session.set_flash(Flash::fail(e.to_string()));
                Ok(Response::Redirect(Route::All))
            }
            Err(e) if e.is_recoverable() => {
                // existence and ownership were checked before validation, so the
                // snippet belongs to this user
                session.set_flash(Flash::fail(e.to_string()));
                Ok(Response::Render(View::Update {
                    form: Some(SnippetForm {
                        id,
                        value,
                        owner: user,
                    }),
                }))
            }
            Err(e) => Err(e),
        }
    }

    pub fn delete_form(&self, session: &mut Session, id: Option<u64>) -> Result<Response> {
        authorize(session)?;
        self.snippet_form(session, id, Route::Delete(None), |form| View::Delete {
            form,
        })
    }

    pub fn delete(&self, session: &mut Session, id: u64) -> Result<Response> {
        let user = authorize(session)?.to_string();
        match commands::delete::run(&self.store, Some(&user), id) {
            Ok(result) => {
                flash_success(session, &result);
                Ok(Response::Redirect(Route::Delete(None)))
            }
            Err(SnipError::NotFound(_)) => {
                session.set_flash(Flash::fail(NO_SUCH_SNIPPET));
                Ok(Response::Redirect(Route::Delete(None)))
            }
            Err(e) if e.is_recoverable() => {
                session.set_flash(Flash::fail(e.to_string()));
                Ok(Response::Redirect(Route::All))
            }
            Err(e) => Err(e),
        }
    }

    pub fn register_form(&self, session: &mut Session) -> Result<Response> {
        if let Some(redirect) = refuse_if_logged_in(session) {
            return Ok(redirect);
        }
        Ok(Response::Render(View::Register { username: None }))
    }

    /// Creates an account and logs it in. `confirm` must repeat `password`.
    pub fn register(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Response> {
        if let Some(redirect) = refuse_if_logged_in(session) {
            return Ok(redirect);
        }
        let outcome = if password != confirm {
            Err(SnipError::Validation(
                "The passwords do not match.".to_string(),
            ))
        } else {
            commands::register::run(&self.store, username, password)
        };

        match outcome {
            Ok(result) => {
                let user = result.user.clone().unwrap_or_else(|| username.to_string());
                session.set_flash(Flash::success(format!(
                    "{} You are logged in as '{}'.",
                    result.success_message().unwrap_or_default(),
                    user
                )));
                session.user = Some(user);
                Ok(Response::Redirect(Route::All))
            }
            Err(e) if e.is_recoverable() => {
                session.set_flash(Flash::fail(e.to_string()));
                Ok(Response::Render(View::Register {
                    username: Some(username.to_string()),
                }))
            }
            Err(e) => Err(e),
        }
    }

    pub fn login_form(&self, session: &mut Session) -> Result<Response> {
        if let Some(redirect) = refuse_if_logged_in(session) {
            return Ok(redirect);
        }
        Ok(Response::Render(View::Login { username: None }))
    }

    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<Response> {
        if let Some(redirect) = refuse_if_logged_in(session) {
            return Ok(redirect);
        }
        match commands::login::run(&self.store, username, password) {
            Ok(result) => {
                flash_success(session, &result);
                session.user = result.user;
                Ok(Response::Redirect(Route::All))
            }
            Err(e) if e.is_recoverable() => {
                session.set_flash(Flash::fail(e.to_string()));
                Ok(Response::Render(View::Login {
                    username: Some(username.to_string()),
                }))
            }
            Err(e) => Err(e),
        }
    }

    pub fn logout_form(&self, session: &mut Session) -> Result<Response> {
        if let Some(redirect) = refuse_if_logged_out(session) {
            return Ok(redirect);
        }
        Ok(Response::Render(View::Logout))
    }

    pub fn logout(&self, session: &mut Session) -> Result<Response> {
        if let Some(redirect) = refuse_if_logged_out(session) {
            return Ok(redirect);
        }
        tracing::info!(user = ?session.user(), "logged out");
        session.user = None;
        session.set_flash(Flash::success("You are now logged out."));
        Ok(Response::Redirect(Route::All))
    }

    /// Maintenance wipe. See the module docs for when it is reachable.
    pub fn clear(&self, session: &mut Session) -> Result<Response> {
        if !self.allow_maintenance {
            return Err(not_found_route());
        }
        authorize(session)?;
        let result = commands::clear::run(&self.store)?;
        // the account behind this session is gone too
        session.user = None;
        flash_success(session, &result);
        Ok(Response::Redirect(Route::All))
    }

    /// Shared GET handling for the update and delete forms.
    fn snippet_form(
        &self,
        session: &mut Session,
        id: Option<u64>,
        chooser: Route,
        view: impl FnOnce(Option<SnippetForm>) -> View,
    ) -> Result<Response> {
        let Some(id) = id else {
            return Ok(Response::Render(view(None)));
        };
        match commands::get::run(&self.store, id) {
            Ok(mut result) => Ok(Response::Render(view(
                result.listed_snippets.pop().map(SnippetForm::from),
            ))),
            Err(e) if e.is_recoverable() => {
                session.set_flash(Flash::fail(NO_SUCH_SNIPPET));
                Ok(Response::Redirect(chooser))
            }
            Err(e) => Err(e),
        }
    }
}

/// The authorization gate in front of new/update/delete.
fn authorize(session: &Session) -> Result<&str> {
    session.user().ok_or_else(|| {
        tracing::debug!("anonymous request refused by authorization gate");
        SnipError::Forbidden("Forbidden".to_string())
    })
}

fn refuse_if_logged_in(session: &mut Session) -> Option<Response> {
    let user = session.user()?.to_string();
    session.set_flash(Flash::fail(format!(
        "You are already logged in as '{}'.",
        user
    )));
    Some(Response::Redirect(Route::All))
}

fn refuse_if_logged_out(session: &mut Session) -> Option<Response> {
    if session.is_authenticated() {
        return None;
    }
    session.set_flash(Flash::fail("You are not logged in."));
    Some(Response::Redirect(Route::All))
}

fn flash_success(session: &mut Session, result: &CmdResult) {
    if let Some(text) = result.success_message() {
        session.set_flash(Flash::success(text));
    }
}
