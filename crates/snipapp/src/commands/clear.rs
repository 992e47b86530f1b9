use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Drops every user, snippet and the id sequence.
///
/// Only reachable through the maintenance route, which the API keeps disabled
/// unless configuration turns it on.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    store.clear()?;
    tracing::warn!("all code snippets and logins cleared");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(
        "All code snippets and logins cleared.",
    ));
    Ok(result)
}
