//! Order synchronization
//!
//! A collector groups unimported orders by website; the processor queues each
//! group, refreshes the catalog rows of the ordered products and stamps the
//! orders as imported.

mod collector;
mod processor;

pub use collector::OrderBatchCollector;
pub use processor::{BatchReport, MarkImportedPolicy, OrderBatchProcessor, products_from_orders};
