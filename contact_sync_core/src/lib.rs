//! Contact Sync Core Library
//!
//! Moves store data into an email-marketing import queue: guest checkouts are
//! staged as contacts and exported per website as CSV files, and unimported
//! orders are queued per website as JSON batches.

pub mod clock;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
pub mod export;
pub mod guest;
pub mod models;
pub mod orders;
pub mod traits;
pub mod websites;

// Re-export main types
pub use clock::{Clock, FixedClock, SystemClock};
#[cfg(feature = "database")]
pub use database::{Database, DatabaseStats};
pub use error::{Error, Result};
pub use export::CsvFileWriter;
pub use guest::{GuestSync, GuestSyncReport, WebsiteExport, guest_filename};
pub use models::{
    BatchOrder, Contact, GuestRecord, ImportMode, ImportQueueEntry, ImportStatus, ImportType,
    Order, OrderBatch, OrderedProduct, QueueStats, Website, WebsiteOrders,
    email_key,
};
pub use orders::{BatchReport, MarkImportedPolicy, OrderBatchCollector, OrderBatchProcessor};
pub use websites::StaticWebsiteDirectory;
