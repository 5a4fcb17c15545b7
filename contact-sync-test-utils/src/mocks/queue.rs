//! Import queue that records registrations

use async_trait::async_trait;
use contact_sync_core::error::SyncError;
use contact_sync_core::traits::ImportQueue;
use contact_sync_core::{ImportQueueEntry, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Records accepted entries; rejects entries of configured websites
#[derive(Clone, Default)]
pub struct RecordingImportQueue {
    state: Arc<Mutex<QueueState>>,
}

#[derive(Default)]
struct QueueState {
    accepted: Vec<ImportQueueEntry>,
    attempts: usize,
    rejected_websites: HashSet<i64>,
    reject_all: bool,
}

impl RecordingImportQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every entry for `website_id`
    pub fn reject_website(&self, website_id: i64) {
        self.state
            .lock()
            .unwrap()
            .rejected_websites
            .insert(website_id);
    }

    pub fn reject_all(&self) {
        self.state.lock().unwrap().reject_all = true;
    }

    /// Entries the queue accepted, in registration order
    pub fn entries(&self) -> Vec<ImportQueueEntry> {
        self.state.lock().unwrap().accepted.clone()
    }

    /// Registration calls, accepted or not
    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }
}

#[async_trait]
impl ImportQueue for RecordingImportQueue {
    async fn register_queue(&self, entry: &ImportQueueEntry) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;

        if state.reject_all || state.rejected_websites.contains(&entry.website_id) {
            return Err(SyncError::queue_rejected(
                entry.import_type.as_str(),
                entry.website_id,
                "queue unavailable",
            )
            .into());
        }

        state.accepted.push(entry.clone());
        Ok(())
    }
}
