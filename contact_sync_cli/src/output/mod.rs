//! Rendering of run reports and queue statistics

mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use anyhow::Result;
use contact_sync_core::{BatchReport, GuestSyncReport, QueueStats};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    fn format_guest_report(&self, report: &GuestSyncReport) -> Result<String>;

    fn format_batch_report(&self, report: &BatchReport) -> Result<String>;

    fn format_queue_stats(&self, stats: &QueueStats) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
