use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipError};
use crate::model::validate_value;
use crate::policy::can_mutate;
use crate::store::DataStore;
use chrono::Utc;

pub fn run<S: DataStore>(
    store: &S,
    identity: Option<&str>,
    id: u64,
    value: String,
) -> Result<CmdResult> {
    let mut snippet = store.get_snippet(id)?;
    if !can_mutate(&snippet, identity) {
        return Err(SnipError::Forbidden(
            "You can only update your own code snippets.".to_string(),
        ));
    }
    validate_value(&value)?;

    snippet.value = value;
    snippet.updated_at = Utc::now();
    store.update_snippet(&snippet)?;

    tracing::info!(id, "code snippet updated");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(
        "The code snippet was updated successfully.",
    ));
    Ok(result.with_affected_snippets(vec![snippet]))
}
