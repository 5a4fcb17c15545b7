//! Catalog refresh implementation

use crate::Result;
use crate::models::{OrderedProduct, time_utils};
use crate::traits::CatalogUpdater;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::BTreeSet;

/// Flags ordered products for re-export in the catalog table
pub struct SqliteCatalogUpdater {
    pool: SqlitePool,
}

impl SqliteCatalogUpdater {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogUpdater for SqliteCatalogUpdater {
    /// Each distinct product id becomes (or goes back to) unprocessed
    async fn execute(&self, products: &[OrderedProduct]) -> Result<()> {
        let product_ids: BTreeSet<i64> = products.iter().map(|product| product.id).collect();
        if product_ids.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        let now = time_utils::now_millis();

        for product_id in product_ids {
            sqlx::query(
                r#"
                INSERT INTO email_catalog (product_id, processed, created_at, updated_at)
                VALUES (?, 0, ?, ?)
                ON CONFLICT(product_id) DO UPDATE SET
                    processed = 0,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(product_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use tempfile::TempDir;

    fn product(id: i64) -> OrderedProduct {
        OrderedProduct {
            id,
            sku: format!("SKU-{id}"),
            name: String::new(),
            qty: 1.0,
            price: 1.0,
        }
    }

    async fn pending_ids(catalog: &SqliteCatalogUpdater) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT product_id FROM email_catalog WHERE processed = 0 ORDER BY product_id",
        )
        .fetch_all(&catalog.pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_execute_resets_processed_products() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(&temp_dir.path().join("test.db")).await.unwrap();
        let catalog = db.catalog();

        catalog
            .execute(&[product(2), product(1), product(2)])
            .await
            .unwrap();
        assert_eq!(pending_ids(&catalog).await, vec![1, 2]);

        // The catalog exporter flags rows once it has sent them
        sqlx::query("UPDATE email_catalog SET processed = 1")
            .execute(db.pool())
            .await
            .unwrap();
        assert!(pending_ids(&catalog).await.is_empty());

        catalog.execute(&[product(1)]).await.unwrap();
        assert_eq!(pending_ids(&catalog).await, vec![1]);
        assert_eq!(db.stats().await.unwrap().catalog_pending_count, 1);
    }

    #[tokio::test]
    async fn test_execute_with_no_products() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(&temp_dir.path().join("test.db")).await.unwrap();

        db.catalog().execute(&[]).await.unwrap();
        assert_eq!(db.stats().await.unwrap().catalog_pending_count, 0);
    }
}
