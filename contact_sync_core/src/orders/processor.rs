//! Order batch processing

use crate::Result;
use crate::models::{BatchOrder, ImportQueueEntry, OrderBatch, OrderedProduct};
use crate::traits::{CatalogUpdater, ImportQueue, OrderRepository};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which orders get their imported date after the enqueue pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkImportedPolicy {
    /// Every order in the batch, even when its website failed to queue
    #[default]
    Always,
    /// Skip the orders of websites whose registration failed
    OnlyQueued,
}

/// Outcome of processing one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Websites whose orders were registered, in batch order
    pub queued_websites: Vec<i64>,
    /// Websites whose registration failed, in batch order
    pub failed_websites: Vec<i64>,
    /// Orders stamped as imported
    pub orders_marked: usize,
    /// Product lines handed to the catalog updater
    pub products_refreshed: usize,
}

/// All products of a website's orders, in order
///
/// Orders without a product list contribute nothing.
pub fn products_from_orders(orders: &[BatchOrder]) -> Vec<OrderedProduct> {
    orders
        .iter()
        .filter_map(|order| order.products.as_ref())
        .flat_map(|products| products.iter().cloned())
        .collect()
}

/// Queues a batch of orders, refreshes their products and marks them imported
pub struct OrderBatchProcessor {
    queue: Arc<dyn ImportQueue>,
    catalog: Arc<dyn CatalogUpdater>,
    orders: Arc<dyn OrderRepository>,
    policy: MarkImportedPolicy,
}

impl OrderBatchProcessor {
    pub fn new(
        queue: Arc<dyn ImportQueue>,
        catalog: Arc<dyn CatalogUpdater>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            queue,
            catalog,
            orders,
            policy: MarkImportedPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MarkImportedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the three passes over the whole batch: enqueue, catalog refresh,
    /// mark imported
    ///
    /// Registration failures are recorded in the report and never retried.
    /// Catalog and mark-imported failures propagate.
    pub async fn process(&self, batch: &OrderBatch) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        self.add_to_import_queue(batch, &mut report).await;
        report.products_refreshed = self.reset_ordered_products(batch).await?;
        report.orders_marked = self
            .mark_orders_as_imported(batch, &report.failed_websites)
            .await?;

        Ok(report)
    }

    async fn add_to_import_queue(&self, batch: &OrderBatch, report: &mut BatchReport) {
        for group in batch.groups() {
            let registered = match ImportQueueEntry::orders(group.website_id, &group.orders) {
                Ok(entry) => self.queue.register_queue(&entry).await,
                Err(e) => Err(e),
            };

            match registered {
                Ok(()) => {
                    info!(
                        "{} orders synced for website id: {}",
                        group.orders.len(),
                        group.website_id
                    );
                    report.queued_websites.push(group.website_id);
                }
                Err(e) => {
                    debug!(
                        "Orders for website id {} were not queued: {e}",
                        group.website_id
                    );
                    report.failed_websites.push(group.website_id);
                }
            }
        }
    }

    async fn reset_ordered_products(&self, batch: &OrderBatch) -> Result<usize> {
        let mut refreshed = 0;
        for group in batch.groups() {
            let products = products_from_orders(&group.orders);
            self.catalog.execute(&products).await?;
            refreshed += products.len();
        }
        Ok(refreshed)
    }

    async fn mark_orders_as_imported(
        &self,
        batch: &OrderBatch,
        failed_websites: &[i64],
    ) -> Result<usize> {
        let ids: Vec<i64> = match self.policy {
            MarkImportedPolicy::Always => batch.order_ids(),
            MarkImportedPolicy::OnlyQueued => batch
                .groups()
                .iter()
                .filter(|group| !failed_websites.contains(&group.website_id))
                .flat_map(|group| group.orders.iter().map(|order| order.id))
                .collect(),
        };

        if ids.is_empty() {
            return Ok(0);
        }

        self.orders.mark_imported_by_ids(&ids).await?;
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64) -> OrderedProduct {
        OrderedProduct {
            id,
            sku: format!("SKU-{id}"),
            name: String::new(),
            qty: 1.0,
            price: 9.99,
        }
    }

    #[test]
    fn test_products_skip_orders_without_list() {
        let orders = vec![
            BatchOrder::new(1).with_products(vec![product(1), product(2)]),
            BatchOrder::new(2),
            BatchOrder::new(3).with_products(vec![product(3)]),
        ];

        let ids: Vec<i64> = products_from_orders(&orders).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_products_of_empty_group() {
        assert!(products_from_orders(&[]).is_empty());
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        let policy: MarkImportedPolicy = serde_json::from_str("\"only_queued\"").unwrap();
        assert_eq!(policy, MarkImportedPolicy::OnlyQueued);
        assert_eq!(MarkImportedPolicy::default(), MarkImportedPolicy::Always);
    }
}
