//! Import queue repository implementation

use crate::Result;
use crate::models::{ImportQueueEntry, ImportStatus, QueueStats, time_utils};
use crate::traits::ImportQueue;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// Repository for the importer table
pub struct SqliteImportQueue {
    pool: SqlitePool,
}

impl SqliteImportQueue {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an entry and return its row id
    pub async fn enqueue(&self, entry: &ImportQueueEntry) -> Result<i64> {
        let now = time_utils::now_millis();

        let result = sqlx::query(
            r#"
            INSERT INTO email_importer (
                import_type, import_data, import_mode, website_id, import_file,
                import_status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.import_type.as_str())
        .bind(&entry.payload)
        .bind(entry.mode.as_str())
        .bind(entry.website_id)
        .bind(&entry.filename)
        .bind(ImportStatus::NotImported.code())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Delete imported entries, returning how many were removed
    pub async fn purge_imported(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM email_importer WHERE import_status = ?")
            .bind(ImportStatus::Imported.code())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Get queue statistics
    pub async fn get_stats(&self) -> Result<QueueStats> {
        let status_counts = sqlx::query(
            r#"
            SELECT import_status, COUNT(*) as count
            FROM email_importer
            GROUP BY import_status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut stats = QueueStats::default();
        for row in status_counts {
            let code: i64 = row.try_get("import_status")?;
            let count: i64 = row.try_get("count")?;
            let count = count as u64;

            match ImportStatus::from_code(code)? {
                ImportStatus::NotImported => stats.not_imported = count,
                ImportStatus::Importing => stats.importing = count,
                ImportStatus::Imported => stats.imported = count,
                ImportStatus::Failed => stats.failed = count,
            }
        }

        let pending = sqlx::query(
            r#"
            SELECT import_type, COUNT(*) as count
            FROM email_importer
            WHERE import_status = ?
            GROUP BY import_type
            ORDER BY import_type ASC
            "#,
        )
        .bind(ImportStatus::NotImported.code())
        .fetch_all(&self.pool)
        .await?;

        for row in pending {
            let import_type: String = row.try_get("import_type")?;
            let count: i64 = row.try_get("count")?;
            stats.pending_by_type.push((import_type, count as u64));
        }

        Ok(stats)
    }
}

#[async_trait]
impl ImportQueue for SqliteImportQueue {
    async fn register_queue(&self, entry: &ImportQueueEntry) -> Result<()> {
        self.enqueue(entry).await.map(|_| ())
    }
}
