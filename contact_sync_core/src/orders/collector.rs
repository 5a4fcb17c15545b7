//! Builds order batches from unimported orders

use crate::Result;
use crate::models::{BatchOrder, Order, OrderBatch};
use crate::traits::{OrderRepository, WebsiteDirectory};
use log::warn;
use std::sync::Arc;

/// Groups unimported orders by the website of their store
pub struct OrderBatchCollector {
    orders: Arc<dyn OrderRepository>,
    websites: Arc<dyn WebsiteDirectory>,
}

impl OrderBatchCollector {
    pub fn new(orders: Arc<dyn OrderRepository>, websites: Arc<dyn WebsiteDirectory>) -> Self {
        Self { orders, websites }
    }

    /// Collect up to `limit` orders, grouped by website in first-seen order
    ///
    /// Orders whose store is not assigned to any website are left out and
    /// stay unimported.
    pub async fn collect(&self, limit: usize) -> Result<OrderBatch> {
        let mut batch = OrderBatch::new();

        for order in self.orders.find_unimported(limit).await? {
            match self.websites.website_id_for_store(order.store_id) {
                Some(website_id) => batch.push(website_id, to_batch_order(order)),
                None => warn!(
                    "Order {} belongs to unknown store {}, left out of batch",
                    order.id, order.store_id
                ),
            }
        }

        Ok(batch)
    }
}

fn to_batch_order(order: Order) -> BatchOrder {
    let mut batch_order = BatchOrder::new(order.id)
        .with_field("store_id", order.store_id)
        .with_field("customer_is_guest", order.customer_is_guest);

    if let Some(email) = order.customer_email {
        batch_order = batch_order.with_field("customer_email", email);
    }
    if !order.products.is_empty() {
        batch_order = batch_order.with_products(order.products);
    }

    batch_order
}
