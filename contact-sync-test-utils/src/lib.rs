//! Test utilities for the contact sync crates
//!
//! In-memory versions of every collaborator trait plus builders for the
//! records the sync components consume.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{OrderBuilder, WebsiteBuilder, fixed_clock, product};
pub use mocks::{
    MemoryContactRepository, MemoryCsvOutput, MemoryOrderRepository, RecordingCatalogUpdater,
    RecordingImportQueue,
};
