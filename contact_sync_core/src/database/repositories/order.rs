//! Order repository implementation

use crate::Result;
use crate::models::{Order, OrderedProduct, email_key, time_utils};
use crate::traits::OrderRepository;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::{HashMap, HashSet};

use super::placeholders;

/// Repository for orders and their product lines
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert orders with their items in one transaction
    ///
    /// Orders are written by the storefront; this is how a local database
    /// gets seeded.
    pub async fn create_many(&self, orders: &[Order]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let now = time_utils::now_millis();

        for order in orders {
            insert_order(&mut tx, order, now).await?;
        }

        tx.commit().await?;
        Ok(orders.len() as u64)
    }

    /// Load the product lines of `orders` in a single pass per chunk
    async fn attach_products(&self, orders: &mut [Order]) -> Result<()> {
        if orders.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = orders.iter().map(|order| order.id).collect();
        let mut by_order: HashMap<i64, Vec<OrderedProduct>> = HashMap::new();

        for chunk in ids.chunks(500) {
            let query = format!(
                r#"SELECT order_id, product_id, sku, name, qty, price
                   FROM order_items
                   WHERE order_id IN ({})
                   ORDER BY order_id, id"#,
                placeholders(chunk.len())
            );
            let mut query_builder = sqlx::query(&query);
            for &id in chunk {
                query_builder = query_builder.bind(id);
            }

            for row in query_builder.fetch_all(&self.pool).await? {
                let order_id: i64 = row.try_get("order_id")?;
                by_order.entry(order_id).or_default().push(OrderedProduct {
                    id: row.try_get("product_id")?,
                    sku: row.try_get("sku")?,
                    name: row.try_get("name")?,
                    qty: row.try_get("qty")?,
                    price: row.try_get("price")?,
                });
            }
        }

        for order in orders.iter_mut() {
            order.products = by_order.remove(&order.id).unwrap_or_default();
        }

        Ok(())
    }
}

fn row_to_order(row: &SqliteRow) -> Result<Order> {
    Ok(Order {
        id: row.try_get("id")?,
        customer_email: row.try_get("customer_email")?,
        customer_is_guest: row.try_get("customer_is_guest")?,
        store_id: row.try_get("store_id")?,
        products: Vec::new(),
        imported_at: row.try_get("imported_at")?,
    })
}

async fn insert_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order: &Order,
    now: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (id, customer_email, customer_is_guest, store_id, imported_at, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(order.id)
    .bind(order.customer_email.as_deref())
    .bind(order.customer_is_guest)
    .bind(order.store_id)
    .bind(order.imported_at)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    for product in &order.products {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, sku, name, qty, price)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.id)
        .bind(product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.qty)
        .bind(product.price)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn find_guest_orders(&self, excluded_emails: &HashSet<String>) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_email, customer_is_guest, store_id, imported_at
            FROM orders
            WHERE customer_is_guest = 1 AND customer_email IS NOT NULL
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            let order = row_to_order(row)?;
            let excluded = order
                .customer_email
                .as_ref()
                .is_some_and(|email| excluded_emails.contains(&email_key(email)));
            if !excluded {
                orders.push(order);
            }
        }

        Ok(orders)
    }

    async fn find_unimported(&self, limit: usize) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_email, customer_is_guest, store_id, imported_at
            FROM orders
            WHERE imported_at IS NULL
            ORDER BY created_at ASC, id ASC
            LIMIT ?
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let mut orders = rows.iter().map(row_to_order).collect::<Result<Vec<_>>>()?;
        self.attach_products(&mut orders).await?;
        Ok(orders)
    }

    async fn mark_imported_by_ids(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut total_affected = 0u64;
        let now = time_utils::now_millis();

        for chunk in ids.chunks(500) {
            let query = format!(
                "UPDATE orders SET imported_at = ? WHERE id IN ({})",
                placeholders(chunk.len())
            );

            let mut query_builder = sqlx::query(&query).bind(now);
            for &id in chunk {
                query_builder = query_builder.bind(id);
            }

            total_affected += query_builder.execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(total_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use tempfile::TempDir;

    async fn setup() -> (SqliteOrderRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(&temp_dir.path().join("test.db")).await.unwrap();
        (db.orders(), temp_dir)
    }

    fn order(id: i64, email: Option<&str>, is_guest: bool) -> Order {
        Order {
            id,
            customer_email: email.map(str::to_string),
            customer_is_guest: is_guest,
            store_id: 1,
            products: Vec::new(),
            imported_at: None,
        }
    }

    #[tokio::test]
    async fn test_guest_orders_exclude_known_emails() {
        let (repo, _temp_dir) = setup().await;
        repo.create_many(&[
            order(1, Some("known@example.com"), true),
            order(2, Some("new@example.com"), true),
            order(3, Some("member@example.com"), false),
            order(4, None, true),
        ])
        .await
        .unwrap();

        let excluded: HashSet<String> = ["known@example.com".to_string()].into();
        let found = repo.find_guest_orders(&excluded).await.unwrap();

        let ids: Vec<i64> = found.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_guest_orders_exclude_known_emails_in_any_case() {
        let (repo, _temp_dir) = setup().await;
        repo.create_many(&[
            order(1, Some("Known@Example.COM"), true),
            order(2, Some("new@example.com"), true),
        ])
        .await
        .unwrap();

        let excluded: HashSet<String> = [email_key("known@example.com")].into();
        let ids: Vec<i64> = repo
            .find_guest_orders(&excluded)
            .await
            .unwrap()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_unimported_orders_carry_products() {
        let (repo, _temp_dir) = setup().await;
        let mut with_items = order(10, Some("a@example.com"), true);
        with_items.products = vec![
            OrderedProduct {
                id: 7,
                sku: "MUG".to_string(),
                name: "Mug".to_string(),
                qty: 2.0,
                price: 4.5,
            },
            OrderedProduct {
                id: 8,
                sku: "CUP".to_string(),
                name: "Cup".to_string(),
                qty: 1.0,
                price: 3.0,
            },
        ];
        repo.create_many(&[with_items.clone(), order(11, None, false)])
            .await
            .unwrap();

        let found = repo.find_unimported(10).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].products, with_items.products);
        assert!(found[1].products.is_empty());

        assert_eq!(repo.find_unimported(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_imported_by_ids() {
        let (repo, _temp_dir) = setup().await;
        repo.create_many(&[order(1, None, false), order(2, None, false), order(3, None, false)])
            .await
            .unwrap();

        assert_eq!(repo.mark_imported_by_ids(&[1, 3, 99]).await.unwrap(), 2);

        let remaining: Vec<i64> = repo
            .find_unimported(10)
            .await
            .unwrap()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(remaining, vec![2]);

        let stamped = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT imported_at FROM orders WHERE id = 1",
        )
        .fetch_one(&repo.pool)
        .await
        .unwrap();
        assert!(stamped.is_some());
    }

    #[tokio::test]
    async fn test_mark_imported_with_no_ids() {
        let (repo, _temp_dir) = setup().await;
        repo.create_many(&[order(1, None, false)]).await.unwrap();

        assert_eq!(repo.mark_imported_by_ids(&[]).await.unwrap(), 0);
        assert_eq!(repo.find_unimported(10).await.unwrap().len(), 1);
    }
}
