//! Website directory built from configuration

use crate::error::{Result, ValidationError};
use crate::models::Website;
use crate::traits::WebsiteDirectory;
use std::collections::{HashMap, HashSet};

/// Fixed list of websites with their store assignments
#[derive(Debug, Clone, Default)]
pub struct StaticWebsiteDirectory {
    websites: Vec<Website>,
    store_index: HashMap<i64, i64>,
}

impl StaticWebsiteDirectory {
    /// Build the directory, rejecting duplicate ids, empty codes and stores
    /// assigned to more than one website
    pub fn new(websites: Vec<Website>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut store_index = HashMap::new();

        for website in &websites {
            if website.code.trim().is_empty() {
                return Err(ValidationError::invalid_configuration(&format!(
                    "website {} has an empty code",
                    website.id
                ))
                .into());
            }
            if !ids.insert(website.id) {
                return Err(ValidationError::invalid_configuration(&format!(
                    "website id {} is configured twice",
                    website.id
                ))
                .into());
            }
            for &store_id in &website.store_ids {
                if let Some(owner) = store_index.insert(store_id, website.id) {
                    return Err(ValidationError::invalid_configuration(&format!(
                        "store {store_id} belongs to websites {owner} and {}",
                        website.id
                    ))
                    .into());
                }
            }
        }

        Ok(Self {
            websites,
            store_index,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.websites.is_empty()
    }
}

impl WebsiteDirectory for StaticWebsiteDirectory {
    fn websites(&self) -> Vec<Website> {
        self.websites.clone()
    }

    fn website_id_for_store(&self, store_id: i64) -> Option<i64> {
        self.store_index.get(&store_id).copied()
    }
}
