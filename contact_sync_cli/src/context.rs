//! Wiring of the sync components from the loaded configuration

use crate::config::AppConfig;
use anyhow::{Context, Result};
use contact_sync_core::database::{
    Database, SqliteCatalogUpdater, SqliteContactRepository, SqliteImportQueue,
    SqliteOrderRepository,
};
use contact_sync_core::{
    CsvFileWriter, GuestSync, OrderBatchCollector, OrderBatchProcessor, StaticWebsiteDirectory,
};
use std::sync::Arc;

/// Opened database and website directory for one CLI invocation
pub struct SyncContext {
    pub config: AppConfig,
    pub database: Database,
    pub websites: Arc<StaticWebsiteDirectory>,
}

impl SyncContext {
    /// Open the configured database and validate the website list
    pub async fn open(config: AppConfig) -> Result<Self> {
        let websites = Arc::new(config.website_directory()?);
        if websites.is_empty() {
            log::warn!("No [[websites]] configured, nothing will be synced");
        }

        log::debug!("Opening database at {}", config.database.path.display());
        let database = Database::new(&config.database.path)
            .await
            .with_context(|| {
                format!(
                    "Failed to open database at {}",
                    config.database.path.display()
                )
            })?;

        Ok(Self {
            config,
            database,
            websites,
        })
    }

    pub fn import_queue(&self) -> SqliteImportQueue {
        self.database.import_queue()
    }

    pub fn guest_sync(&self) -> GuestSync {
        let contacts: Arc<SqliteContactRepository> = Arc::new(self.database.contacts());
        let orders: Arc<SqliteOrderRepository> = Arc::new(self.database.orders());

        GuestSync::new(
            contacts,
            orders,
            Arc::new(self.import_queue()),
            Arc::new(CsvFileWriter::new(&self.config.export.directory)),
            self.websites.clone(),
        )
    }

    pub fn order_collector(&self) -> OrderBatchCollector {
        OrderBatchCollector::new(Arc::new(self.database.orders()), self.websites.clone())
    }

    pub fn order_processor(&self) -> OrderBatchProcessor {
        let catalog: Arc<SqliteCatalogUpdater> = Arc::new(self.database.catalog());

        OrderBatchProcessor::new(
            Arc::new(self.import_queue()),
            catalog,
            Arc::new(self.database.orders()),
        )
        .with_policy(self.config.mark_imported_policy())
    }
}
