//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Storage backend error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// CSV encoding error
    #[error("CSV error: {message}")]
    Csv { message: String },

    /// Payload serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal assertion failure
    #[error("Internal assertion failed: {message}")]
    Assertion { message: String },
}

impl InternalError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a CSV error
    pub fn csv(message: impl Into<String>) -> Self {
        Self::Csv {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal assertion failure error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error() {
        let error = InternalError::storage("database is locked");
        assert!(error.to_string().contains("Storage error"));
        assert!(error.to_string().contains("database is locked"));
    }

    #[test]
    fn test_serialization_error() {
        let error = InternalError::serialization("trailing comma");
        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_assertion_error() {
        let error = InternalError::assertion("Invariant violated");
        assert!(error.to_string().contains("Internal assertion failed"));
        assert!(error.to_string().contains("Invariant violated"));
    }
}
