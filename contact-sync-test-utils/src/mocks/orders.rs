//! In-memory order table

use async_trait::async_trait;
use contact_sync_core::error::InternalError;
use contact_sync_core::models::time_utils;
use contact_sync_core::traits::OrderRepository;
use contact_sync_core::{Error, Order, Result, email_key};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Orders kept in insertion order, recording every mark-imported call
#[derive(Clone, Default)]
pub struct MemoryOrderRepository {
    state: Arc<Mutex<OrderState>>,
}

#[derive(Default)]
struct OrderState {
    orders: Vec<Order>,
    mark_calls: Vec<Vec<i64>>,
    fail_mark: bool,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        let repo = Self::new();
        repo.state.lock().unwrap().orders = orders;
        repo
    }

    pub fn add_order(&self, order: Order) {
        self.state.lock().unwrap().orders.push(order);
    }

    /// Make every mark-imported call fail
    pub fn fail_marking(&self) {
        self.state.lock().unwrap().fail_mark = true;
    }

    /// Id lists passed to each mark-imported call
    pub fn mark_calls(&self) -> Vec<Vec<i64>> {
        self.state.lock().unwrap().mark_calls.clone()
    }

    /// Ids of orders carrying an imported date
    pub fn imported_ids(&self) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .orders
            .iter()
            .filter(|o| o.imported_at.is_some())
            .map(|o| o.id)
            .collect()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn find_guest_orders(&self, excluded_emails: &HashSet<String>) -> Result<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .filter(|o| o.customer_is_guest)
            .filter(|o| {
                o.customer_email
                    .as_ref()
                    .is_some_and(|email| !excluded_emails.contains(&email_key(email)))
            })
            .cloned()
            .collect())
    }

    async fn find_unimported(&self, limit: usize) -> Result<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .filter(|o| o.imported_at.is_none())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn mark_imported_by_ids(&self, ids: &[i64]) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.mark_calls.push(ids.to_vec());
        if state.fail_mark {
            return Err(Error::Internal(InternalError::storage(
                "order table is locked",
            )));
        }

        let now = time_utils::now_millis();
        let mut marked = 0;
        for order in state.orders.iter_mut().filter(|o| ids.contains(&o.id)) {
            order.imported_at = Some(now);
            marked += 1;
        }
        Ok(marked)
    }
}
