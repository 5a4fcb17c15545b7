//! Order batch processing integration tests

use contact_sync_core::{
    BatchOrder, ImportType, MarkImportedPolicy, OrderBatch, OrderBatchCollector,
    OrderBatchProcessor, StaticWebsiteDirectory, WebsiteOrders,
};
use contact_sync_test_utils::{
    MemoryOrderRepository, OrderBuilder, RecordingCatalogUpdater, RecordingImportQueue,
    WebsiteBuilder, product,
};
use proptest::prelude::*;
use std::sync::Arc;

struct Harness {
    queue: RecordingImportQueue,
    catalog: RecordingCatalogUpdater,
    orders: MemoryOrderRepository,
}

impl Harness {
    fn new() -> Self {
        Self {
            queue: RecordingImportQueue::new(),
            catalog: RecordingCatalogUpdater::new(),
            orders: MemoryOrderRepository::new(),
        }
    }

    fn processor(&self) -> OrderBatchProcessor {
        OrderBatchProcessor::new(
            Arc::new(self.queue.clone()),
            Arc::new(self.catalog.clone()),
            Arc::new(self.orders.clone()),
        )
    }
}

/// {1: [101 with p1, p2], 2: [202 without products]}
fn two_website_batch() -> OrderBatch {
    OrderBatch::from(vec![
        WebsiteOrders {
            website_id: 1,
            orders: vec![BatchOrder::new(101).with_products(vec![product(1), product(2)])],
        },
        WebsiteOrders {
            website_id: 2,
            orders: vec![BatchOrder::new(202)],
        },
    ])
}

#[tokio::test]
async fn test_batch_is_queued_refreshed_and_marked() {
    let harness = Harness::new();
    let report = harness.processor().process(&two_website_batch()).await.unwrap();

    let entries = harness.queue.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.import_type == ImportType::Orders));
    assert_eq!(entries[0].website_id, 1);
    assert_eq!(entries[1].website_id, 2);

    let queued: Vec<BatchOrder> = serde_json::from_str(&entries[0].payload).unwrap();
    assert_eq!(queued, two_website_batch().groups()[0].orders);

    assert_eq!(harness.catalog.call_ids(), vec![vec![1, 2], vec![]]);
    assert_eq!(harness.orders.mark_calls(), vec![vec![101, 202]]);

    assert_eq!(report.queued_websites, vec![1, 2]);
    assert!(report.failed_websites.is_empty());
    assert_eq!(report.orders_marked, 2);
    assert_eq!(report.products_refreshed, 2);
}

#[tokio::test]
async fn test_failed_registration_still_marks_all_orders() {
    let harness = Harness::new();
    harness.queue.reject_website(2);

    let report = harness.processor().process(&two_website_batch()).await.unwrap();

    assert_eq!(harness.queue.attempts(), 2);
    assert_eq!(harness.queue.entries().len(), 1);
    assert_eq!(report.failed_websites, vec![2]);
    assert_eq!(harness.catalog.calls().len(), 2);
    assert_eq!(harness.orders.mark_calls(), vec![vec![101, 202]]);
}

#[tokio::test]
async fn test_only_queued_policy_leaves_failed_orders() {
    let harness = Harness::new();
    harness.queue.reject_website(2);

    let report = harness
        .processor()
        .with_policy(MarkImportedPolicy::OnlyQueued)
        .process(&two_website_batch())
        .await
        .unwrap();

    assert_eq!(harness.orders.mark_calls(), vec![vec![101]]);
    assert_eq!(report.orders_marked, 1);
}

#[tokio::test]
async fn test_empty_batch_touches_nothing() {
    let harness = Harness::new();
    let report = harness.processor().process(&OrderBatch::new()).await.unwrap();

    assert_eq!(harness.queue.attempts(), 0);
    assert!(harness.catalog.calls().is_empty());
    assert!(harness.orders.mark_calls().is_empty());
    assert_eq!(report.orders_marked, 0);
}

#[tokio::test]
async fn test_catalog_failure_stops_before_marking() {
    let harness = Harness::new();
    harness.catalog.fail_updates();

    let result = harness.processor().process(&two_website_batch()).await;

    assert!(result.is_err());
    assert_eq!(harness.queue.entries().len(), 2);
    assert!(harness.orders.mark_calls().is_empty());
}

#[tokio::test]
async fn test_mark_failure_propagates() {
    let harness = Harness::new();
    harness.orders.fail_marking();

    assert!(harness.processor().process(&two_website_batch()).await.is_err());
    assert_eq!(harness.orders.mark_calls().len(), 1);
}

#[tokio::test]
async fn test_collected_batch_round_trip() {
    let harness = Harness::new();
    for order in [
        OrderBuilder::new(1).store(10).products(&[5]).build(),
        OrderBuilder::new(2).store(20).guest("g@example.com").build(),
        OrderBuilder::new(3).store(10).products(&[6, 7]).build(),
        OrderBuilder::new(4).store(99).build(),
        OrderBuilder::new(5).store(10).imported().build(),
    ] {
        harness.orders.add_order(order);
    }

    let websites = Arc::new(
        StaticWebsiteDirectory::new(vec![
            WebsiteBuilder::new(1, "base").stores(&[10]).build(),
            WebsiteBuilder::new(2, "b2b").stores(&[20]).build(),
        ])
        .unwrap(),
    );
    let collector = OrderBatchCollector::new(Arc::new(harness.orders.clone()), websites);

    let batch = collector.collect(100).await.unwrap();
    let layout: Vec<(i64, Vec<i64>)> = batch
        .groups()
        .iter()
        .map(|g| (g.website_id, g.orders.iter().map(|o| o.id).collect()))
        .collect();
    assert_eq!(layout, vec![(1, vec![1, 3]), (2, vec![2])]);

    harness.processor().process(&batch).await.unwrap();
    assert_eq!(harness.orders.imported_ids(), vec![1, 2, 3, 5]);
    assert_eq!(harness.catalog.call_ids(), vec![vec![5, 6, 7], vec![]]);

    // Order 4 has no website and stays pending
    let next = collector.collect(100).await.unwrap();
    assert!(next.is_empty());
}

#[tokio::test]
async fn test_collect_respects_limit() {
    let harness = Harness::new();
    for id in 1..=5 {
        harness.orders.add_order(OrderBuilder::new(id).build());
    }

    let websites = Arc::new(
        StaticWebsiteDirectory::new(vec![WebsiteBuilder::new(1, "base").build()]).unwrap(),
    );
    let collector = OrderBatchCollector::new(Arc::new(harness.orders.clone()), websites);

    assert_eq!(collector.collect(3).await.unwrap().order_count(), 3);
}

fn batch_strategy() -> impl Strategy<Value = Vec<(i64, Vec<Vec<i64>>)>> {
    prop::collection::vec(
        (
            1i64..6,
            prop::collection::vec(prop::collection::vec(1i64..50, 0..4), 0..4),
        ),
        0..5,
    )
}

proptest! {
    #[test]
    fn prop_catalog_sees_every_product_in_batch_order(groups in batch_strategy()) {
        let mut batch = OrderBatch::new();
        let mut next_id = 1;
        for (website_id, orders) in &groups {
            for product_ids in orders {
                let order = if product_ids.is_empty() {
                    BatchOrder::new(next_id)
                } else {
                    BatchOrder::new(next_id)
                        .with_products(product_ids.iter().copied().map(product).collect())
                };
                batch.push(*website_id, order);
                next_id += 1;
            }
        }

        let expected_products: Vec<i64> = batch
            .groups()
            .iter()
            .flat_map(|g| g.orders.iter())
            .filter_map(|o| o.products.as_ref())
            .flat_map(|p| p.iter().map(|p| p.id))
            .collect();

        let harness = Harness::new();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let report = runtime.block_on(harness.processor().process(&batch)).unwrap();

        let seen: Vec<i64> = harness.catalog.call_ids().into_iter().flatten().collect();
        prop_assert_eq!(seen, expected_products);
        prop_assert_eq!(harness.catalog.calls().len(), batch.groups().len());
        prop_assert_eq!(report.orders_marked, batch.order_count());
        prop_assert_eq!(harness.queue.entries().len(), batch.groups().len());
    }
}
