//! # Configuration
//!
//! Snip configuration is a [`confique`] struct, loaded in priority order:
//! 1. **Environment variables**: `SNIP_DATA_DIR`, `SNIP_SESSION_FILE`, `SNIP_SESSION_TTL_HOURS`,
//!    `SNIP_ALLOW_MAINTENANCE`.
//! 2. **Config file**: `snip.toml` in the OS config directory (via `directories`), or
//!    the file passed explicitly.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where snippets, users and counters live |
//! | `session_file` | per data directory, in the OS state directory | Where this client keeps its login |
//! | `session_ttl_hours` | `24` | How long a login lasts |
//! | `allow_maintenance` | `false` | Enables the `/clear` route that wipes all data |
//!
//! ## Sessions
//!
//! A data directory may be shared by several people, a login may not. Unless
//! `session_file` is set, each client keeps its session under its own OS state
//! directory (the cache directory where the OS has no state directory), in
//! `sessions/<key>.json`. The key is a UUIDv5 of the canonical data directory path,
//! so one client can switch between stores without mixing their logins.

use crate::error::{Result, SnipError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const CONFIG_FILE_NAME: &str = "snip.toml";
pub const SESSIONS_DIR: &str = "sessions";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnipConfig {
    /// Directory holding snippets.json, users.json and counters.json.
    #[config(env = "SNIP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Explicit session file. Unset means one file per data directory in the
    /// client's own state directory.
    #[config(env = "SNIP_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Hours a login stays valid without activity.
    #[config(env = "SNIP_SESSION_TTL_HOURS", default = 24)]
    pub session_ttl_hours: u64,

    /// Expose the maintenance route that drops all persisted data.
    #[config(env = "SNIP_ALLOW_MAINTENANCE", default = false)]
    pub allow_maintenance: bool,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            session_file: None,
            session_ttl_hours: 24,
            allow_maintenance: false,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "snip", "snip")
}

impl SnipConfig {
    /// Default location of the config file, if the OS has a config directory.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from the environment, then `file` (or the default file), then defaults.
    /// A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file.map(Path::to_path_buf).or_else(Self::default_file) {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| SnipError::Validation(format!("Invalid configuration: {}", e)))
    }

    /// The data directory: explicit override, then config, then the OS data directory.
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                SnipError::StorageUnavailable("Could not determine a data directory".to_string())
            })
    }

    /// The session file for `data_dir`: explicit override, then config, then a file
    /// private to this client and keyed by the data directory.
    pub fn resolve_session_file(
        &self,
        override_file: Option<&Path>,
        data_dir: &Path,
    ) -> Result<PathBuf> {
        if let Some(file) = override_file {
            return Ok(file.to_path_buf());
        }
        if let Some(file) = &self.session_file {
            return Ok(file.clone());
        }
        let dirs = project_dirs().ok_or_else(|| {
            SnipError::StorageUnavailable("Could not determine a state directory".to_string())
        })?;
        let base = dirs.state_dir().unwrap_or_else(|| dirs.cache_dir());
        Ok(base.join(SESSIONS_DIR).join(session_file_name(data_dir)))
    }
}

/// `<uuid>.json`, stable for every spelling of the same directory.
fn session_file_name(data_dir: &Path) -> String {
    let canonical = stable_path(data_dir);
    let key = Uuid::new_v5(&Uuid::NAMESPACE_URL, canonical.as_os_str().as_encoded_bytes());
    format!("{}.json", key)
}

/// Canonical form of `path`, even before it exists: the deepest existing ancestor
/// is canonicalized and the missing components are appended to it.
fn stable_path(path: &Path) -> PathBuf {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        if let Ok(real) = fs::canonicalize(current) {
            return missing.iter().rev().fold(real, |acc, part| acc.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                current = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}
