//! Order builder

use contact_sync_core::{Order, OrderedProduct};

/// A product line with a derived SKU
pub fn product(id: i64) -> OrderedProduct {
    OrderedProduct {
        id,
        sku: format!("SKU-{id}"),
        name: format!("Product {id}"),
        qty: 1.0,
        price: 10.0,
    }
}

/// Builds an unimported order placed by a registered customer
pub struct OrderBuilder {
    order: Order,
}

impl OrderBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            order: Order {
                id,
                customer_email: None,
                customer_is_guest: false,
                store_id: 1,
                products: Vec::new(),
                imported_at: None,
            },
        }
    }

    /// Guest checkout with the given email
    pub fn guest(mut self, email: &str) -> Self {
        self.order.customer_email = Some(email.to_string());
        self.order.customer_is_guest = true;
        self
    }

    /// Registered customer checkout with the given email
    pub fn customer(mut self, email: &str) -> Self {
        self.order.customer_email = Some(email.to_string());
        self.order.customer_is_guest = false;
        self
    }

    pub fn store(mut self, store_id: i64) -> Self {
        self.order.store_id = store_id;
        self
    }

    pub fn products(mut self, product_ids: &[i64]) -> Self {
        self.order.products = product_ids.iter().copied().map(product).collect();
        self
    }

    pub fn imported(mut self) -> Self {
        self.order.imported_at = Some(1);
        self
    }

    pub fn build(self) -> Order {
        self.order
    }
}
