use crate::error::Result;
use crate::model::{Snippet, User};
use std::collections::BTreeMap;

/// Snippets keyed by id. Ordered so listings come back in id order.
pub type SnippetMap = BTreeMap<u64, Snippet>;

/// Users keyed by username.
pub type UserMap = BTreeMap<String, User>;

/// Sequence counters keyed by name, value is the next id to hand out.
pub type CounterMap = BTreeMap<String, u64>;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while SnippetStore handles the "what" (sequence rules, uniqueness, not-found).
pub trait StorageBackend {
    // --- Collections ---

    fn load_snippets(&self) -> Result<SnippetMap>;

    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_snippets(&self, snippets: &SnippetMap) -> Result<()>;

    fn load_users(&self) -> Result<UserMap>;

    fn save_users(&self, users: &UserMap) -> Result<()>;

    fn load_counters(&self) -> Result<CounterMap>;

    fn save_counters(&self, counters: &CounterMap) -> Result<()>;

    // --- Coordination ---

    /// Run `f` as the only writer.
    ///
    /// Every load-modify-save cycle in `SnippetStore` goes through here, so two
    /// writers (threads or processes) never interleave on the same collection.
    fn exclusive<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;

    /// Drop every collection, counters included.
    fn wipe(&self) -> Result<()>;
}
