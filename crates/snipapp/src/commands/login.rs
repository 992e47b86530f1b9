use crate::auth::verify_password;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipError};
use crate::store::DataStore;

/// Checks credentials.
///
/// Unknown usernames and wrong passwords fail identically, so the response does
/// not reveal which usernames exist.
pub fn run<S: DataStore>(store: &S, username: &str, password: &str) -> Result<CmdResult> {
    let user = match store.find_user(username)? {
        Some(user) if verify_password(password, &user.password_hash) => user,
        _ => {
            tracing::debug!(username, "login refused");
            return Err(SnipError::InvalidCredentials);
        }
    };

    tracing::info!(username, "logged in");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "You are logged in as '{}'.",
        user.username
    )));
    result.user = Some(user.username);
    Ok(result)
}
