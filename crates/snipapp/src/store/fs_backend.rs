use super::backend::{CounterMap, SnippetMap, StorageBackend, UserMap};
use crate::error::{Result, SnipError};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SNIPPETS_FILE: &str = "snippets.json";
const USERS_FILE: &str = "users.json";
const COUNTERS_FILE: &str = "counters.json";
const LOCK_FILE: &str = "LOCK";

pub struct FsBackend {
    root: PathBuf,
}

/// Holds the advisory lock on `LOCK` until dropped.
struct WriterLock {
    file: File,
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        // unlock errors on drop are ignored, closing the file releases the lock anyway
        let _ = self.file.unlock();
    }
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| self.unavailable(&self.root, e))?;
        }
        Ok(())
    }

    fn unavailable(&self, path: &Path, err: std::io::Error) -> SnipError {
        tracing::error!(path = %path.display(), error = %err, "storage I/O failed");
        SnipError::StorageUnavailable(format!("{}: {}", path.display(), err))
    }

    fn acquire_writer(&self) -> Result<WriterLock> {
        self.ensure_dir()?;
        let path = self.root.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| self.unavailable(&path, e))?;
        file.lock_exclusive()
            .map_err(|e| self.unavailable(&path, e))?;
        Ok(WriterLock { file })
    }

    fn load_json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| self.unavailable(&path, e))?;
        let value = serde_json::from_str(&content).map_err(SnipError::Serialization)?;
        Ok(value)
    }

    fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let path = self.root.join(name);
        let content = serde_json::to_string_pretty(value).map_err(SnipError::Serialization)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(|e| self.unavailable(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| self.unavailable(&path, e))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.root.join(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| self.unavailable(&path, e))?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_snippets(&self) -> Result<SnippetMap> {
        self.load_json(SNIPPETS_FILE)
    }

    fn save_snippets(&self, snippets: &SnippetMap) -> Result<()> {
        self.save_json(SNIPPETS_FILE, snippets)
    }

    fn load_users(&self) -> Result<UserMap> {
        self.load_json(USERS_FILE)
    }

    fn save_users(&self, users: &UserMap) -> Result<()> {
        self.save_json(USERS_FILE, users)
    }

    fn load_counters(&self) -> Result<CounterMap> {
        self.load_json(COUNTERS_FILE)
    }

    fn save_counters(&self, counters: &CounterMap) -> Result<()> {
        self.save_json(COUNTERS_FILE, counters)
    }

    fn exclusive<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _writer = self.acquire_writer()?;
        f()
    }

    fn wipe(&self) -> Result<()> {
        self.remove(SNIPPETS_FILE)?;
        self.remove(USERS_FILE)?;
        self.remove(COUNTERS_FILE)
    }
}
