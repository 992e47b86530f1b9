use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ErrorKind, Result, SnipError};
use crate::model::{validate_value, Snippet};
use crate::sequence;
use crate::store::DataStore;

/// How many ids to try before giving up on a create.
const MAX_ALLOCATION_ATTEMPTS: usize = 8;

pub fn run<S: DataStore>(store: &S, identity: Option<&str>, value: String) -> Result<CmdResult> {
    let owner = identity.ok_or_else(|| {
        SnipError::Unauthorized("You must be logged in to create code snippets.".to_string())
    })?;
    validate_value(&value)?;

    let mut attempts = 0;
    let snippet = loop {
        attempts += 1;
        let id = sequence::allocate(store)?;
        let snippet = Snippet::new(id, value.clone(), owner.to_string());
        match store.insert_snippet(&snippet) {
            Ok(()) => break snippet,
            // id survived a concurrent reset, take the next one
            Err(e) if e.kind() == ErrorKind::Conflict && attempts < MAX_ALLOCATION_ATTEMPTS => {
                tracing::warn!(id, attempts, "snippet id already taken, allocating again");
            }
            Err(e) => return Err(e),
        }
    };

    tracing::info!(id = snippet.id, owner, "code snippet created");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(
        "The code snippet was saved successfully.",
    ));
    Ok(result.with_affected_snippets(vec![snippet]))
}
