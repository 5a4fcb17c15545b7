//! Website builder

use contact_sync_core::Website;

/// Builds a website that accepts guest sync unless told otherwise
pub struct WebsiteBuilder {
    website: Website,
}

impl WebsiteBuilder {
    pub fn new(id: i64, code: &str) -> Self {
        Self {
            website: Website {
                id,
                code: code.to_string(),
                name: format!("{code} website"),
                api_enabled: true,
                guest_sync_enabled: true,
                guest_address_book: Some("Guests".to_string()),
                mapped_store_name: None,
                store_ids: vec![id],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.website.name = name.to_string();
        self
    }

    pub fn stores(mut self, store_ids: &[i64]) -> Self {
        self.website.store_ids = store_ids.to_vec();
        self
    }

    pub fn mapped_store_name(mut self, name: &str) -> Self {
        self.website.mapped_store_name = Some(name.to_string());
        self
    }

    pub fn api_disabled(mut self) -> Self {
        self.website.api_enabled = false;
        self
    }

    pub fn guest_sync_disabled(mut self) -> Self {
        self.website.guest_sync_enabled = false;
        self
    }

    pub fn unmapped(mut self) -> Self {
        self.website.guest_address_book = None;
        self
    }

    pub fn build(self) -> Website {
        self.website
    }
}
