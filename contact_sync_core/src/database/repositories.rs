//! Repository implementations backed by SQLite

pub mod catalog;
pub mod contact;
pub mod importer;
pub mod order;

pub use catalog::SqliteCatalogUpdater;
pub use contact::SqliteContactRepository;
pub use importer::SqliteImportQueue;
pub use order::SqliteOrderRepository;

/// Comma separated `?` placeholders
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}
