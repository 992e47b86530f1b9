use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipError};
use crate::policy::can_mutate;
use crate::sequence;
use crate::store::DataStore;

/// Deletes a snippet. When it was the last one, snippet numbering restarts at 1.
pub fn run<S: DataStore>(store: &S, identity: Option<&str>, id: u64) -> Result<CmdResult> {
    let snippet = store.get_snippet(id)?;
    if !can_mutate(&snippet, identity) {
        return Err(SnipError::Forbidden(
            "You can only delete your own code snippets.".to_string(),
        ));
    }

    let remaining = store.delete_snippet(id)?;
    tracing::info!(id, remaining, "code snippet deleted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(
        "The code snippet was deleted successfully.",
    ));
    if remaining == 0 && sequence::reset_if_empty(store)? {
        result.add_message(CmdMessage::info(
            "No code snippets left, numbering starts over at 1.",
        ));
    }
    Ok(result.with_affected_snippets(vec![snippet]))
}
