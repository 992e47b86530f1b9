//! Session persistence between invocations.
//!
//! Each client keeps its session in a file of its own (see
//! [`SnipConfig::resolve_session_file`](snipapp::config::SnipConfig::resolve_session_file)),
//! never in the shared data directory, together with the time it stops being valid.
//! Saving always pushes the expiry forward, so a login lasts as long as the CLI
//! keeps being used.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use snipapp::session::Session;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    session: Session,
    expires_at: DateTime<Utc>,
}

pub struct SessionFile {
    path: PathBuf,
    ttl: Duration,
}

impl SessionFile {
    pub fn new(path: PathBuf, ttl_hours: u64) -> Self {
        let hours = i64::try_from(ttl_hours).unwrap_or(i64::MAX);
        Self {
            path,
            ttl: Duration::try_hours(hours).unwrap_or(Duration::MAX),
        }
    }

    /// Missing, expired and unreadable sessions all load as anonymous.
    pub fn load(&self, now: DateTime<Utc>) -> Session {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Session::anonymous(),
        };
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) if stored.expires_at > now => stored.session,
            Ok(_) => {
                tracing::debug!("session expired");
                Session::anonymous()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Session::anonymous()
            }
        }
    }

    pub fn save(&self, session: &Session, now: DateTime<Utc>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating session directory {}", dir.display()))?;
        }
        let stored = StoredSession {
            session: session.clone(),
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        // concurrent invocations each write their own temp file, the last rename wins
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = self.path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp, content).with_context(|| format!("writing {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("writing {}", self.path.display()));
        }
        Ok(())
    }
}
