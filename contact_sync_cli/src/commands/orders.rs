use super::emit;
use crate::config::AppConfig;
use crate::context::SyncContext;
use crate::output::OutputFormatter;
use anyhow::{Context, Result};
use contact_sync_core::OrderBatch;
use std::fs;
use std::path::Path;

/// Collect one batch of unimported orders and process it
pub async fn run_order_sync(
    config: AppConfig,
    limit: Option<usize>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let limit = limit.unwrap_or(config.orders.batch_limit);
    if limit == 0 {
        anyhow::bail!("--limit must be greater than 0");
    }

    let context = SyncContext::open(config).await?;

    let batch = context
        .order_collector()
        .collect(limit)
        .await
        .context("Failed to collect unimported orders")?;
    log::debug!(
        "Collected {} orders across {} websites",
        batch.order_count(),
        batch.groups().len()
    );

    let report = context
        .order_processor()
        .process(&batch)
        .await
        .context("Failed to process order batch")?;

    emit(&formatter.format_batch_report(&report)?);
    Ok(())
}

/// Process a batch read from a JSON file
pub async fn run_order_batch(
    config: AppConfig,
    file: &Path,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let batch = load_batch_file(file)?;
    let context = SyncContext::open(config).await?;

    let report = context
        .order_processor()
        .process(&batch)
        .await
        .context("Failed to process order batch")?;

    emit(&formatter.format_batch_report(&report)?);
    Ok(())
}

/// Read a batch file: `[{"website_id": 1, "orders": [{"id": 101, ...}]}]`
pub fn load_batch_file(file: &Path) -> Result<OrderBatch> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read batch file {}", file.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid batch file {}", file.display()))
}
