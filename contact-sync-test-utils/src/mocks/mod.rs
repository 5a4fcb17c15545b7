//! In-memory collaborators for testing

mod catalog;
mod contacts;
mod csv;
mod orders;
mod queue;

pub use catalog::RecordingCatalogUpdater;
pub use contacts::MemoryContactRepository;
pub use csv::MemoryCsvOutput;
pub use orders::MemoryOrderRepository;
pub use queue::RecordingImportQueue;
