//! File system errors raised while writing exports or opening the database

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failed file system operation and the path it touched
#[derive(Error, Debug)]
#[error("{}", describe(self))]
pub struct IoError {
    pub kind: IoErrorKind,
    pub path: Option<PathBuf>,
    #[source]
    pub source: std::io::Error,
}

/// Failure classes callers report differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    NotFound,
    PermissionDenied,
    Other,
}

impl IoError {
    /// Wrap a standard I/O error, classifying it by its kind
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source,
        }
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn describe(error: &IoError) -> String {
    let target = error
        .path
        .as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default();

    match error.kind {
        IoErrorKind::NotFound => format!("Missing{target}: {}", error.source),
        IoErrorKind::PermissionDenied => format!("No write access to{target}: {}", error.source),
        IoErrorKind::Other => format!("Export I/O failed{target}: {}", error.source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_kind_follows_std_error() {
        let missing = IoError::from_std(io::Error::from(io::ErrorKind::NotFound));
        let denied = IoError::from_std(io::Error::from(io::ErrorKind::PermissionDenied));
        let busy = IoError::from_std(io::Error::other("device busy"));

        assert_eq!(missing.kind, IoErrorKind::NotFound);
        assert_eq!(denied.kind, IoErrorKind::PermissionDenied);
        assert_eq!(busy.kind, IoErrorKind::Other);
    }

    #[test]
    fn test_message_names_path_and_cause() {
        let error = IoError::from_std(io::Error::other("device busy"))
            .with_path(Path::new("/export/b2b_guest.csv"));

        let message = error.to_string();
        assert!(message.contains("/export/b2b_guest.csv"));
        assert!(message.contains("device busy"));
    }

    #[test]
    fn test_message_without_path() {
        let error = IoError::from_std(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(error.to_string().starts_with("No write access to:"));
    }
}
