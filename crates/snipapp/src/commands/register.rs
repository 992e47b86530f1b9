use crate::auth::hash_password;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipError};
use crate::model::{User, MAX_CREDENTIAL_LEN, MIN_PASSWORD_LEN};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, username: &str, password: &str) -> Result<CmdResult> {
    validate(username, password)?;
    // cheap pre-check, the insert below is the authoritative one
    if store.find_user(username)?.is_some() {
        return Err(SnipError::Conflict("That username is taken.".to_string()));
    }

    let user = User::new(username.to_string(), hash_password(password)?);
    store.insert_user(&user)?;

    tracing::info!(username, "account registered");
    let mut result = CmdResult {
        user: Some(user.username),
        ..Default::default()
    };
    result.add_message(CmdMessage::success(
        "Your new account was created successfully.",
    ));
    Ok(result)
}

fn validate(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(SnipError::Validation("A username is required.".to_string()));
    }
    if username.chars().count() > MAX_CREDENTIAL_LEN {
        return Err(SnipError::Validation(format!(
            "The username exceeds the limit ({}).",
            MAX_CREDENTIAL_LEN
        )));
    }
    let password_len = password.chars().count();
    if password_len < MIN_PASSWORD_LEN {
        return Err(SnipError::Validation(format!(
            "The password is too short, use at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    if password_len > MAX_CREDENTIAL_LEN {
        return Err(SnipError::Validation(format!(
            "The password exceeds the limit ({}).",
            MAX_CREDENTIAL_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::error::ErrorKind;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn stores_hashed_password() {
        let store = InMemoryStore::new();
        let result = run(&store, "alice", "secret1").unwrap();
        assert_eq!(result.user.as_deref(), Some("alice"));

        let user = store.find_user("alice").unwrap().unwrap();
        assert_ne!(user.password_hash, "secret1");
        assert!(verify_password("secret1", &user.password_hash));
    }

    #[test]
    fn duplicate_username_is_conflict() {
        let store = InMemoryStore::new();
        run(&store, "alice", "secret1").unwrap();
        let err = run(&store, "alice", "other-password").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let user = store.find_user("alice").unwrap().unwrap();
        assert!(verify_password("secret1", &user.password_hash));
    }

    #[test]
    fn short_password_is_rejected() {
        let store = InMemoryStore::new();
        let err = run(&store, "alice", "12345").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(run(&store, "alice", "123456").is_ok());
    }

    #[test]
    fn overlong_credentials_are_rejected() {
        let store = InMemoryStore::new();
        let long = "x".repeat(MAX_CREDENTIAL_LEN + 1);
        assert_eq!(
            run(&store, &long, "secret1").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            run(&store, "alice", &long).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert!(store.find_user("alice").unwrap().is_none());
    }

    #[test]
    fn blank_username_is_rejected() {
        let store = InMemoryStore::new();
        let err = run(&store, "  ", "secret1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
