//! SQLite storage for contacts, orders, the import queue and the catalog
//!
//! Every collaborator trait in [`crate::traits`] that touches storage has a
//! repository here. All repositories share one pool.

pub mod migrations;
pub mod repositories;
pub mod schema;

use crate::{
    Error, Result,
    error::{InternalError, IoError},
};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

pub use repositories::{
    SqliteCatalogUpdater, SqliteContactRepository, SqliteImportQueue, SqliteOrderRepository,
};

/// Database connection manager with connection pooling
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) a database file and bring its schema up to date
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Io(IoError::from_std(e).with_path(db_path)))?;
        }

        let connect_options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                Error::Internal(InternalError::storage(format!(
                    "Failed to connect to database: {e}"
                )))
            })?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn contacts(&self) -> SqliteContactRepository {
        SqliteContactRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> SqliteOrderRepository {
        SqliteOrderRepository::new(self.pool.clone())
    }

    pub fn import_queue(&self) -> SqliteImportQueue {
        SqliteImportQueue::new(self.pool.clone())
    }

    pub fn catalog(&self) -> SqliteCatalogUpdater {
        SqliteCatalogUpdater::new(self.pool.clone())
    }

    async fn migrate(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Get database statistics
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let contact_count = self.count("SELECT COUNT(*) FROM contacts").await?;
        let pending_guest_count = self
            .count("SELECT COUNT(*) FROM contacts WHERE is_guest = 1 AND email_imported = 0")
            .await?;
        let order_count = self.count("SELECT COUNT(*) FROM orders").await?;
        let unimported_order_count = self
            .count("SELECT COUNT(*) FROM orders WHERE imported_at IS NULL")
            .await?;
        let queue_count = self.count("SELECT COUNT(*) FROM email_importer").await?;
        let catalog_pending_count = self
            .count("SELECT COUNT(*) FROM email_catalog WHERE processed = 0")
            .await?;

        Ok(DatabaseStats {
            contact_count,
            pending_guest_count,
            order_count,
            unimported_order_count,
            queue_count,
            catalog_pending_count,
        })
    }

    async fn count(&self, sql: &str) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

/// Database statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub contact_count: u64,
    pub pending_guest_count: u64,
    pub order_count: u64,
    pub unimported_order_count: u64,
    pub queue_count: u64,
    pub catalog_pending_count: u64,
}
