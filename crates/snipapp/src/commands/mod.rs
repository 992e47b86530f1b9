//! # Command Layer
//!
//! This module contains the **core business logic** of snip. Each operation lives in
//! its own submodule as a plain function over a [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate input (lengths, password rules)
//! - Enforce ownership through [`crate::policy`]
//! - Drive the id sequence through [`crate::sequence`]
//! - Return a structured [`CmdResult`] or a typed [`SnipError`](crate::error::SnipError)
//!
//! ## What Commands Do NOT Do
//!
//! - **Sessions and flashes**: the API layer decides what the user sees
//! - **Authorization gate**: the API refuses anonymous access before calling in;
//!   commands still take the identity as `Option<&str>` and check it themselves
//! - **Any I/O besides the store**
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Tests use `InMemoryStore`
//! and cover every failure branch.
//!
//! ## Command Modules
//!
//! - [`list`]: List snippets, sorted by value, optionally filtered by owner
//! - [`get`]: Fetch one snippet
//! - [`create`]: Create a snippet with the next id
//! - [`update`]: Change a snippet's value (owner only)
//! - [`delete`]: Remove a snippet (owner only), restarting ids when empty
//! - [`register`]: Create an account
//! - [`login`]: Check credentials
//! - [`clear`]: Wipe all data (maintenance)

use crate::model::Snippet;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod clear;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod login;
pub mod register;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

/// A snippet as shown in listings, with its age already rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ListedSnippet {
    pub id: u64,
    pub value: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    /// Human-relative age, e.g. "3 minutes ago"
    pub age: String,
}

impl ListedSnippet {
    pub fn from_snippet(snippet: Snippet, now: DateTime<Utc>) -> Self {
        let age = format_age(snippet.created_at, now);
        Self {
            id: snippet.id,
            value: snippet.value,
            owner: snippet.owner,
            created_at: snippet.created_at,
            age,
        }
    }
}

/// Renders the distance between `timestamp` and `now` as "N units ago".
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Snippets created, changed or removed by the command
    pub affected_snippets: Vec<Snippet>,
    /// Snippets to display
    pub listed_snippets: Vec<ListedSnippet>,
    /// Identity established by login or registration
    pub user: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.affected_snippets = snippets;
        self
    }

    pub fn with_listed_snippets(mut self, snippets: Vec<ListedSnippet>) -> Self {
        self.listed_snippets = snippets;
        self
    }

    /// The first success message, which the API layer turns into the flash.
    pub fn success_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.level == MessageLevel::Success)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn age_is_relative_to_now() {
        let now = Utc::now();
        assert_eq!(format_age(now - Duration::minutes(3), now), "3 minutes ago");
        assert_eq!(format_age(now - Duration::hours(1), now), "1 hour ago");
    }

    #[test]
    fn future_timestamps_read_as_now() {
        let now = Utc::now();
        assert_eq!(
            format_age(now + Duration::minutes(5), now),
            format_age(now, now)
        );
    }

    #[test]
    fn success_message_skips_info() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("numbering restarted"));
        result.add_message(CmdMessage::success("deleted"));
        assert_eq!(result.success_message(), Some("deleted"));
    }
}
