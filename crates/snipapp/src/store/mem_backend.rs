use super::backend::{CounterMap, SnippetMap, StorageBackend, UserMap};
use crate::error::{Result, SnipError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// In-memory storage backend for testing.
///
/// Uses `Mutex` rather than `RefCell` so a single backend can be shared between
/// threads (see the concurrent allocation tests). The writer lock is separate from
/// the collection locks, which are only held for a single load or save.
#[derive(Default)]
pub struct MemBackend {
    snippets: Mutex<SnippetMap>,
    users: Mutex<UserMap>,
    counters: Mutex<CounterMap>,
    writer: Mutex<()>,
    simulate_write_error: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| SnipError::StorageUnavailable("memory store lock poisoned".to_string()))
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(SnipError::StorageUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_snippets(&self) -> Result<SnippetMap> {
        Ok(lock(&self.snippets)?.clone())
    }

    fn save_snippets(&self, snippets: &SnippetMap) -> Result<()> {
        self.check_writable()?;
        *lock(&self.snippets)? = snippets.clone();
        Ok(())
    }

    fn load_users(&self) -> Result<UserMap> {
        Ok(lock(&self.users)?.clone())
    }

    fn save_users(&self, users: &UserMap) -> Result<()> {
        self.check_writable()?;
        *lock(&self.users)? = users.clone();
        Ok(())
    }

    fn load_counters(&self) -> Result<CounterMap> {
        Ok(lock(&self.counters)?.clone())
    }

    fn save_counters(&self, counters: &CounterMap) -> Result<()> {
        self.check_writable()?;
        *lock(&self.counters)? = counters.clone();
        Ok(())
    }

    fn exclusive<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _writer = lock(&self.writer)?;
        f()
    }

    fn wipe(&self) -> Result<()> {
        self.check_writable()?;
        lock(&self.snippets)?.clear();
        lock(&self.users)?.clear();
        lock(&self.counters)?.clear();
        Ok(())
    }
}
