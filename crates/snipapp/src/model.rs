use crate::error::{Result, SnipError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest snippet value accepted, in characters.
pub const MAX_SNIPPET_LEN: usize = 5000;

/// Longest username or password accepted, in characters.
pub const MAX_CREDENTIAL_LEN: usize = 2000;

/// Shortest password accepted, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: u64,
    pub value: String,
    /// Username of the creator. Only this user may change the snippet.
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(id: u64, value: String, owner: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            value,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// argon2id PHC string, never the password itself
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Checks a snippet value against the length bounds.
pub fn validate_value(value: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(SnipError::Validation(
            "The code snippet value is required.".to_string(),
        ));
    }
    if len > MAX_SNIPPET_LEN {
        return Err(SnipError::Validation(format!(
            "The code snippet ({} characters) exceeds the limit ({}).",
            len, MAX_SNIPPET_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_rejected() {
        let err = validate_value("").unwrap_err();
        assert!(matches!(err, SnipError::Validation(_)));
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(validate_value(&"a".repeat(MAX_SNIPPET_LEN)).is_ok());
        let err = validate_value(&"a".repeat(MAX_SNIPPET_LEN + 1)).unwrap_err();
        assert!(err.to_string().contains("exceeds the limit (5000)"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 5000 two-byte characters are still 5000 characters
        assert!(validate_value(&"é".repeat(MAX_SNIPPET_LEN)).is_ok());
    }

    #[test]
    fn new_snippet_timestamps_match() {
        let snippet = Snippet::new(1, "print(1)".into(), "alice".into());
        assert_eq!(snippet.created_at, snippet.updated_at);
        assert_eq!(snippet.owner, "alice");
    }
}
