use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a [`SnipError`].
///
/// The API layer branches on the kind: everything except `StorageUnavailable` and
/// `Internal` is recoverable and ends up as a flash message on the originating form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Forbidden,
    Unauthorized,
    InvalidCredentials,
    StorageUnavailable,
    Internal,
}

#[derive(Error, Debug)]
pub enum SnipError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A fault in request handling itself, not in storage or user input.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnipError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnipError::Validation(_) => ErrorKind::Validation,
            SnipError::Conflict(_) => ErrorKind::Conflict,
            SnipError::NotFound(_) => ErrorKind::NotFound,
            SnipError::Forbidden(_) => ErrorKind::Forbidden,
            SnipError::Unauthorized(_) => ErrorKind::Unauthorized,
            SnipError::InvalidCredentials => ErrorKind::InvalidCredentials,
            SnipError::StorageUnavailable(_) | SnipError::Io(_) | SnipError::Serialization(_) => {
                ErrorKind::StorageUnavailable
            }
            SnipError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status the error page reports for this error.
    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Unauthorized | ErrorKind::InvalidCredentials => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::StorageUnavailable | ErrorKind::Internal => 500,
        }
    }

    /// Whether the API layer turns this error into a flash message instead of an error page.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::StorageUnavailable | ErrorKind::Internal
        )
    }
}

pub type Result<T> = std::result::Result<T, SnipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_serde_failures_count_as_storage_unavailable() {
        let io = SnipError::from(std::io::Error::other("disk gone"));
        assert_eq!(io.kind(), ErrorKind::StorageUnavailable);
        assert_eq!(io.status(), 500);
        assert!(!io.is_recoverable());

        let serde = SnipError::from(serde_json::from_str::<u64>("nope").unwrap_err());
        assert_eq!(serde.kind(), ErrorKind::StorageUnavailable);
    }

    #[test]
    fn statuses_follow_kind() {
        assert_eq!(SnipError::Forbidden("x".into()).status(), 403);
        assert_eq!(SnipError::NotFound("x".into()).status(), 404);
        assert_eq!(SnipError::Conflict("x".into()).status(), 409);
        assert_eq!(SnipError::Validation("x".into()).status(), 400);
        assert_eq!(SnipError::InvalidCredentials.status(), 401);
    }

    #[test]
    fn internal_errors_are_fatal_but_not_storage() {
        let err = SnipError::Internal("Too many redirects".into());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.status(), 500);
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Internal error: Too many redirects");
    }

    #[test]
    fn messages_are_passed_through_verbatim() {
        let err = SnipError::Validation("The passwords do not match.".into());
        assert_eq!(err.to_string(), "The passwords do not match.");
        assert_eq!(
            SnipError::InvalidCredentials.to_string(),
            "Invalid login credentials"
        );
    }
}
