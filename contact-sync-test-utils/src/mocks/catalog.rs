//! Catalog updater that records calls

use async_trait::async_trait;
use contact_sync_core::error::InternalError;
use contact_sync_core::traits::CatalogUpdater;
use contact_sync_core::{Error, OrderedProduct, Result};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct RecordingCatalogUpdater {
    state: Arc<Mutex<CatalogState>>,
}

#[derive(Default)]
struct CatalogState {
    calls: Vec<Vec<OrderedProduct>>,
    fail: bool,
}

impl RecordingCatalogUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_updates(&self) {
        self.state.lock().unwrap().fail = true;
    }

    /// Product lists passed to each call
    pub fn calls(&self) -> Vec<Vec<OrderedProduct>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Product ids of each call
    pub fn call_ids(&self) -> Vec<Vec<i64>> {
        self.calls()
            .iter()
            .map(|products| products.iter().map(|p| p.id).collect())
            .collect()
    }
}

#[async_trait]
impl CatalogUpdater for RecordingCatalogUpdater {
    async fn execute(&self, products: &[OrderedProduct]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(products.to_vec());
        if state.fail {
            return Err(Error::Internal(InternalError::storage(
                "catalog table is locked",
            )));
        }
        Ok(())
    }
}
