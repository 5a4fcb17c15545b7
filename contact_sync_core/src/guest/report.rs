//! Per-run results of the guest sync

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of exporting one website's guests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteExport {
    pub website_id: i64,
    pub website_code: String,
    /// Export file name, `None` when the website had no pending guests
    pub filename: Option<String>,
    /// Number of CSV data rows written
    pub exported: usize,
    /// Whether the import queue accepted the file
    pub queued: bool,
}

impl WebsiteExport {
    pub(crate) fn empty(website_id: i64, website_code: &str) -> Self {
        Self {
            website_id,
            website_code: website_code.to_string(),
            ..Default::default()
        }
    }
}

/// Outcome of a full guest sync run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestSyncReport {
    /// Guest records staged by the discovery step; rows already present
    /// in the contact table are skipped by the insert
    pub contacts_created: usize,
    /// One entry per website that passed the configuration checks
    pub exports: Vec<WebsiteExport>,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl GuestSyncReport {
    /// Guests exported across all websites
    pub fn total_exported(&self) -> usize {
        self.exports.iter().map(|export| export.exported).sum()
    }

    /// Exports whose file could not be registered with the queue
    pub fn unqueued(&self) -> impl Iterator<Item = &WebsiteExport> {
        self.exports
            .iter()
            .filter(|export| export.exported > 0 && !export.queued)
    }
}

/// Format a duration as `HH:MM:SS`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (total / 3600) % 24,
        (total / 60) % 60,
        total % 60
    )
}

mod duration_secs {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
