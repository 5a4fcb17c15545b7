//! Collaborator interfaces used by the sync components
//!
//! The guest sync and the order batch processor only talk to storage, the
//! file system and the import queue through these traits. The SQLite
//! implementations live in [`crate::database`]; in-memory versions live in
//! the test utilities crate.

use crate::Result;
use crate::models::{
    Contact, GuestRecord, ImportQueueEntry, Order, OrderedProduct, Website,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Access to the contact table
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every email currently present in the contact table, as
    /// [`email_key`](crate::models::email_key) values
    async fn find_all_emails(&self) -> Result<HashSet<String>>;

    /// Insert all records in a single statement
    async fn bulk_insert(&self, records: &[GuestRecord]) -> Result<u64>;

    /// Guest contacts of a website that were not exported yet, in table order
    async fn find_unimported_guests(&self, website_id: i64) -> Result<Vec<Contact>>;

    /// Persist a single contact
    async fn save(&self, contact: &Contact) -> Result<()>;
}

/// Access to sales orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Guest orders whose [`email_key`](crate::models::email_key) is not in `excluded_emails`
    async fn find_guest_orders(&self, excluded_emails: &HashSet<String>) -> Result<Vec<Order>>;

    /// Orders not yet imported, oldest first
    async fn find_unimported(&self, limit: usize) -> Result<Vec<Order>>;

    /// Stamp the imported date on every listed order
    async fn mark_imported_by_ids(&self, ids: &[i64]) -> Result<u64>;
}

/// The importer queue consumed by the downstream bulk importer
#[async_trait]
pub trait ImportQueue: Send + Sync {
    /// Register one unit of work; an `Err` means the entry was not queued
    async fn register_queue(&self, entry: &ImportQueueEntry) -> Result<()>;
}

/// Refreshes derived catalog data for ordered products
#[async_trait]
pub trait CatalogUpdater: Send + Sync {
    async fn execute(&self, products: &[OrderedProduct]) -> Result<()>;
}

/// Appends CSV rows to export files
pub trait CsvOutput: Send + Sync {
    /// Full path of an export file
    fn file_path(&self, filename: &str) -> PathBuf;

    /// Append one row, creating the file if needed
    fn append_row(&self, path: &Path, row: &[String]) -> Result<()>;
}

/// Website configuration lookup
pub trait WebsiteDirectory: Send + Sync {
    /// All configured websites, in configuration order
    fn websites(&self) -> Vec<Website>;

    /// Website that owns a store
    fn website_id_for_store(&self, store_id: i64) -> Option<i64>;
}
