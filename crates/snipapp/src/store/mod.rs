//! # Storage Layer
//!
//! This module defines the storage abstraction for snip. The [`DataStore`] trait
//! allows the application to work with different storage backends.
//!
//! ## Store vs Backend
//!
//! Storage is split in two:
//! 1. [`backend::StorageBackend`]: raw load/save of whole collections plus an
//!    exclusive section. Knows about files or memory, nothing else.
//! 2. [`snippet_store::SnippetStore`]: implements [`DataStore`] on top of any backend.
//!    Owns the rules: ids are unique, usernames are unique, the sequence is bumped
//!    atomically.
//!
//! ## Single Writer
//!
//! Every mutation is a load-modify-save cycle run inside `StorageBackend::exclusive`.
//! For the file backend that is an advisory lock on `LOCK` in the data directory,
//! so separate `snip` processes serialize their writes as well as threads do.
//! Reads take no lock; a listing is a best-effort snapshot.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── snippets.json       # id -> Snippet
//! ├── users.json          # username -> User
//! ├── counters.json       # sequence name -> next id
//! └── LOCK                # writer lock
//! ```
//!
//! Sessions are not part of the store. Each client keeps its own, outside the data
//! directory (see [`crate::config::SnipConfig::resolve_session_file`]).

use crate::error::Result;
use crate::model::{Snippet, User};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod snippet_store;

/// Abstract interface for snippet, user and sequence storage.
///
/// All methods take `&self`: backends synchronize internally, which lets several
/// request handlers share one store.
pub trait DataStore {
    // --- Sequences ---

    /// Hand out the next value of the named sequence and advance it, atomically.
    /// A sequence that was never used starts at 1.
    fn next_sequence_value(&self, name: &str) -> Result<u64>;

    /// Force the named sequence back to 1.
    fn reset_sequence(&self, name: &str) -> Result<()>;

    /// Put the named sequence back to 1 if no snippet exists, checked under the
    /// same exclusive section as the reset. Returns whether it was reset.
    fn reset_sequence_if_empty(&self, name: &str) -> Result<bool>;

    // --- Snippets ---

    /// Store a new snippet. Fails with `Conflict` if the id is already taken.
    fn insert_snippet(&self, snippet: &Snippet) -> Result<()>;

    /// Replace an existing snippet. Fails with `NotFound` if it does not exist.
    fn update_snippet(&self, snippet: &Snippet) -> Result<()>;

    fn get_snippet(&self, id: u64) -> Result<Snippet>;

    /// All snippets in ascending id order.
    fn list_snippets(&self) -> Result<Vec<Snippet>>;

    /// Remove a snippet and return how many remain.
    fn delete_snippet(&self, id: u64) -> Result<usize>;

    // --- Users ---

    /// Store a new user. Fails with `Conflict` if the username is taken.
    fn insert_user(&self, user: &User) -> Result<()>;

    fn find_user(&self, username: &str) -> Result<Option<User>>;

    // --- Maintenance ---

    /// Remove all users, snippets and sequences.
    fn clear(&self) -> Result<()>;
}
