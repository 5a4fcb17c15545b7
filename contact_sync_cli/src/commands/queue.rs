use super::emit;
use crate::config::AppConfig;
use crate::context::SyncContext;
use crate::output::OutputFormatter;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

/// Import queue commands
#[derive(Debug, Subcommand)]
pub enum QueueCommand {
    /// Show importer queue statistics
    Status,

    /// Delete entries the importer already processed
    Purge,
}

pub async fn run_queue_command(
    command: QueueCommand,
    config: AppConfig,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let context = SyncContext::open(config).await?;
    let queue = context.import_queue();

    match command {
        QueueCommand::Status => {
            let stats = queue
                .get_stats()
                .await
                .context("Failed to read queue statistics")?;
            emit(&formatter.format_queue_stats(&stats)?);
        }
        QueueCommand::Purge => {
            let removed = queue
                .purge_imported()
                .await
                .context("Failed to purge imported entries")?;
            eprintln!("{}", format!("Removed {removed} imported entries").green());
        }
    }

    Ok(())
}
