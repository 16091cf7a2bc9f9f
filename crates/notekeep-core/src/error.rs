//! Error types for notekeep.

use thiserror::Error;

/// Result type alias using notekeep's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notekeep operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note absent, or owned by someone other than the caller
    #[error("{0}")]
    NotFound(String),

    /// Title missing, blank, or too long
    #[error("{0}")]
    InvalidTitle(String),

    /// Identifier does not have the UUID v4 shape
    #[error("{0}")]
    InvalidIdentifier(String),

    /// Page or limit could not be parsed
    #[error("{0}")]
    InvalidPagination(String),

    /// Any other rejected request input
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for failures caused by the request itself (400/404).
    ///
    /// Everything else is an unexpected store or server failure.
    pub fn is_classified(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::InvalidTitle(_)
                | Error::InvalidIdentifier(_)
                | Error::InvalidPagination(_)
                | Error::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("Note not found".to_string());
        assert_eq!(err.to_string(), "Note not found");
    }

    #[test]
    fn test_error_display_validation_is_bare_message() {
        assert_eq!(
            Error::InvalidTitle("Title is required".into()).to_string(),
            "Title is required"
        );
        assert_eq!(
            Error::InvalidIdentifier("Invalid note ID".into()).to_string(),
            "Invalid note ID"
        );
        assert_eq!(
            Error::InvalidPagination("Limit must be an integer".into()).to_string(),
            "Limit must be an integer"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("PORT must be a number".to_string());
        assert_eq!(err.to_string(), "Configuration error: PORT must be a number");
    }

    #[test]
    fn test_error_display_internal() {
        let err = Error::Internal("unexpected state".to_string());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }

    #[test]
    fn test_classified_errors() {
        assert!(Error::NotFound("x".into()).is_classified());
        assert!(Error::InvalidTitle("x".into()).is_classified());
        assert!(Error::InvalidIdentifier("x".into()).is_classified());
        assert!(Error::InvalidPagination("x".into()).is_classified());
        assert!(Error::InvalidInput("x".into()).is_classified());
    }

    #[test]
    fn test_unclassified_errors() {
        assert!(!Error::Internal("x".into()).is_classified());
        assert!(!Error::Config("x".into()).is_classified());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_classified());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
