//! Contact repository implementation

use crate::error::InternalError;
use crate::models::{Contact, GuestRecord, email_key, time_utils};
use crate::traits::ContactRepository;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;

/// Rows per multi-value insert, keeps the statement under SQLite's
/// parameter limit
const INSERT_CHUNK: usize = 500;

/// Repository for the contact table
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn update(&self, contact: &Contact) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET email = ?, website_id = ?, store_id = ?, is_guest = ?,
                email_imported = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&contact.email)
        .bind(contact.website_id)
        .bind(contact.store_id)
        .bind(contact.is_guest)
        .bind(contact.email_imported)
        .bind(time_utils::now_millis())
        .bind(contact.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::Internal(InternalError::storage(format!(
                "contact {} does not exist",
                contact.id
            ))));
        }

        Ok(())
    }
}

fn row_to_contact(row: &SqliteRow) -> Result<Contact> {
    Ok(Contact {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        website_id: row.try_get("website_id")?,
        store_id: row.try_get("store_id")?,
        is_guest: row.try_get("is_guest")?,
        email_imported: row.try_get("email_imported")?,
    })
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn find_all_emails(&self) -> Result<HashSet<String>> {
        let emails = sqlx::query_scalar::<_, String>("SELECT email FROM contacts")
            .fetch_all(&self.pool)
            .await?;

        Ok(emails.iter().map(|email| email_key(email)).collect())
    }

    /// Rows that collide with an existing (email, website) pair are skipped;
    /// the email column compares without case
    async fn bulk_insert(&self, records: &[GuestRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;
        let now = time_utils::now_millis();

        for chunk in records.chunks(INSERT_CHUNK) {
            let mut query = String::from(
                r#"INSERT OR IGNORE INTO contacts (
                    email, website_id, store_id, is_guest, email_imported,
                    created_at, updated_at
                ) VALUES "#,
            );
            let values: Vec<&str> = chunk.iter().map(|_| "(?, ?, ?, ?, 0, ?, ?)").collect();
            query.push_str(&values.join(", "));

            let mut query_builder = sqlx::query(&query);
            for record in chunk {
                query_builder = query_builder
                    .bind(&record.email)
                    .bind(record.website_id)
                    .bind(record.store_id)
                    .bind(record.is_guest)
                    .bind(now)
                    .bind(now);
            }

            inserted += query_builder.execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_unimported_guests(&self, website_id: i64) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, website_id, store_id, is_guest, email_imported
            FROM contacts
            WHERE website_id = ? AND is_guest = 1 AND email_imported = 0
            ORDER BY id ASC
            "#,
        )
        .bind(website_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_contact).collect()
    }

    async fn save(&self, contact: &Contact) -> Result<()> {
        self.update(contact).await
    }
}
