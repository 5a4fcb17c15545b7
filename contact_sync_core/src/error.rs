//! Error types for the contact sync core library
//!
//! Errors are grouped into categories so callers can tell a broken export
//! directory from a rejected queue entry or a failed guest save.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod sync;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::sync::SyncError;
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the contact sync core library
///
/// - I/O errors: export directory and CSV file access
/// - Sync errors: guest persistence and import queue registration
/// - Validation errors: website configuration and stored values
/// - Internal errors: storage and serialization failures
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Synchronization errors
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => Self::Io(IoError::from_std(io_err)),
            other => Self::Internal(InternalError::csv(format!("{other:?}"))),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(InternalError::serialization(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(InternalError::storage(format!("Database error: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_guest_persistence_error_creation() {
        let error = Error::Sync(SyncError::guest_persistence(
            "main",
            "guest@example.com",
            "disk full",
        ));

        match error {
            Error::Sync(SyncError::GuestPersistence {
                website,
                email,
                message,
            }) => {
                assert_eq!(website, "main");
                assert_eq!(email, "guest@example.com");
                assert_eq!(message, "disk full");
            }
            _ => panic!("Expected Sync::GuestPersistence error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::NotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = json_error.into();

        assert!(matches!(
            error,
            Error::Internal(InternalError::Serialization { .. })
        ));
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let path = Path::new("/var/export/main_guest.csv");
        let error = Error::Io(IoError::from_std(io_error).with_path(path));

        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Io(
                IoError::from_std(io::Error::from(io::ErrorKind::NotFound))
                    .with_path(Path::new("export/main.csv")),
            ),
            Error::Sync(SyncError::queue_rejected("Orders", 1, "queue offline")),
            Error::Validation(ValidationError::invalid_configuration("Invalid setting")),
            Error::Internal(InternalError::storage("locked")),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
