use super::emit;
use crate::config::AppConfig;
use crate::context::SyncContext;
use crate::output::OutputFormatter;
use anyhow::{Context, Result};

/// Discover new guests, export them per website and queue the files
pub async fn run_guest_sync(config: AppConfig, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = SyncContext::open(config).await?;

    let report = context
        .guest_sync()
        .sync()
        .await
        .context("Guest sync failed")?;

    for export in report.unqueued() {
        log::warn!(
            "Guest file for website '{}' was written but not queued",
            export.website_code
        );
    }

    emit(&formatter.format_guest_report(&report)?);
    Ok(())
}
