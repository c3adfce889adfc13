//! Error types for ncup-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! The three server conditions the transfer engine recovers from (404, 405, 409)
//! are modeled as named variants so callers branch on outcomes, not status codes.

use thiserror::Error;

/// Result type alias for ncup-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ncup-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid local or remote path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Remote entry not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote entry already exists (405 on MKCOL / directory upload)
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Conflict (409, e.g. creating a directory that is already there)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Network or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed server response
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Unrecognized HTTP failure status
    #[error("Server returned HTTP {status} for {path}")]
    Http { status: u16, path: String },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidPath(_) => 2, // UsageError
            Error::Network(_) | Error::Http { .. } => 3,   // NetworkError
            Error::Auth(_) => 4,                           // AuthError
            Error::NotFound(_) => 5,                       // NotFound
            Error::AlreadyExists(_) | Error::Conflict(_) => 6, // Conflict
            _ => 1,                                        // GeneralError
        }
    }

    /// Whether the transfer engine may report this error and continue with
    /// the next item in the batch.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::AlreadyExists(_) | Error::Conflict(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::InvalidPath("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(
            Error::Http {
                status: 500,
                path: "/a".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::AlreadyExists("test".into()).exit_code(), 6);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 6);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
        assert_eq!(Error::Protocol("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_recoverable_set() {
        assert!(Error::NotFound("x".into()).is_recoverable());
        assert!(Error::AlreadyExists("x".into()).is_recoverable());
        assert!(Error::Conflict("x".into()).is_recoverable());
        assert!(!Error::Auth("x".into()).is_recoverable());
        assert!(!Error::Network("x".into()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("Documents/missing".into());
        assert_eq!(err.to_string(), "Not found: Documents/missing");

        let err = Error::Http {
            status: 507,
            path: "big.bin".into(),
        };
        assert_eq!(err.to_string(), "Server returned HTTP 507 for big.bin");
    }
}
