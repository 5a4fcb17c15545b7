//! Synchronization error types

use thiserror::Error;

/// Errors raised while moving records towards the import queue
#[derive(Error, Debug)]
pub enum SyncError {
    /// Marking a guest contact as imported failed; aborts the website export
    #[error("Failed to save guest '{email}' for website '{website}': {message}")]
    GuestPersistence {
        website: String,
        email: String,
        message: String,
    },

    /// The import queue refused an entry
    #[error("Import queue rejected {import_type} entry for website {website_id}: {reason}")]
    QueueRejected {
        import_type: String,
        website_id: i64,
        reason: String,
    },
}

impl SyncError {
    /// Create a guest persistence error
    pub fn guest_persistence(website: &str, email: &str, message: &str) -> Self {
        Self::GuestPersistence {
            website: website.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a queue rejection error
    pub fn queue_rejected(import_type: &str, website_id: i64, reason: &str) -> Self {
        Self::QueueRejected {
            import_type: import_type.to_string(),
            website_id,
            reason: reason.to_string(),
        }
    }
}
