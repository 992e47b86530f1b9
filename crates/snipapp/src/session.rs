//! # Session
//!
//! The per-client state a request carries: who is logged in, and at most one
//! pending flash message.
//!
//! A [`Session`] is a plain value. The client loads it before a request, hands it to
//! the API as `&mut Session`, and persists it afterwards (the CLI keeps one file per
//! client and data directory). The API never reaches for ambient state.
//!
//! The flash is one-shot: whoever renders the next view calls [`Session::take_flash`],
//! which clears it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn fail(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Fail,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<String>,
    pub flash: Option<Flash>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            flash: None,
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replaces any pending flash.
    pub fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }

    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_is_consumed_once() {
        let mut session = Session::anonymous();
        session.set_flash(Flash::success("saved"));
        assert_eq!(session.take_flash(), Some(Flash::success("saved")));
        assert_eq!(session.take_flash(), None);
    }

    #[test]
    fn later_flash_replaces_earlier() {
        let mut session = Session::authenticated("alice");
        session.set_flash(Flash::success("first"));
        session.set_flash(Flash::fail("second"));
        assert_eq!(session.take_flash().unwrap().text, "second");
        assert_eq!(session.user(), Some("alice"));
    }

    #[test]
    fn serializes_kind_in_lowercase() {
        let json = serde_json::to_string(&Flash::fail("nope")).unwrap();
        assert_eq!(json, r#"{"kind":"fail","text":"nope"}"#);
    }
}
