//! # Snippet Id Sequence
//!
//! Snippets are numbered by a single persistent counter named [`SNIPPET_SEQUENCE`].
//!
//! ## Rules
//!
//! - The counter does not exist until the first snippet is created. That first
//!   allocation returns 1 and stores 2.
//! - Every later allocation returns the stored value and stores value + 1.
//! - When a delete leaves the snippet collection empty, [`reset_if_empty`] puts the
//!   counter back to 1, so numbering starts over. Emptiness is checked again under
//!   the same exclusive section as the reset.
//!
//! ## Atomicity
//!
//! The read and the increment happen inside the store's exclusive section
//! ([`crate::store::DataStore::next_sequence_value`]), so two requests can never
//! be handed the same id.
//!
//! A reset can still land between another request's allocation and its insert. The
//! counter then restarts below an id that is about to exist. Inserts refuse taken ids
//! with `Conflict`, and [`crate::commands::create`] retries allocation in that case.

use crate::error::Result;
use crate::store::DataStore;

/// Name of the counter that numbers snippets.
pub const SNIPPET_SEQUENCE: &str = "snippets";

/// Take the next snippet id.
pub fn allocate<S: DataStore>(store: &S) -> Result<u64> {
    let id = store.next_sequence_value(SNIPPET_SEQUENCE)?;
    tracing::debug!(id, "allocated snippet id");
    Ok(id)
}

/// Restart snippet numbering at 1.
pub fn reset<S: DataStore>(store: &S) -> Result<()> {
    store.reset_sequence(SNIPPET_SEQUENCE)?;
    tracing::info!("snippet id sequence reset to 1");
    Ok(())
}

/// Restart numbering at 1 only if the snippet collection is still empty.
///
/// Used after a delete: a create that slipped in between the delete and this call
/// keeps the counter where it is.
pub fn reset_if_empty<S: DataStore>(store: &S) -> Result<bool> {
    let reset = store.reset_sequence_if_empty(SNIPPET_SEQUENCE)?;
    if reset {
        tracing::info!("snippet collection empty, id sequence reset to 1");
    }
    Ok(reset)
}
