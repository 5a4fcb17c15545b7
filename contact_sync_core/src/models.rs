//! Record types shared by the sync components
//!
//! These are plain data holders. Repositories hand them out in query order
//! and the sync components never reorder them.

use crate::error::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A guest contact staged for insertion into the contact table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub email: String,
    pub website_id: i64,
    pub store_id: i64,
    pub is_guest: bool,
}

impl GuestRecord {
    /// Create a guest record for an order placed without an account
    pub fn new(email: impl Into<String>, website_id: i64, store_id: i64) -> Self {
        Self {
            email: email.into(),
            website_id,
            store_id,
            is_guest: true,
        }
    }
}

/// Comparison key for an email address
///
/// Addresses match regardless of case and surrounding whitespace. Stored
/// rows keep the address as it was entered.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A row of the contact table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub email: String,
    pub website_id: i64,
    pub store_id: i64,
    pub is_guest: bool,
    pub email_imported: bool,
}

/// A store grouping with its integration toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// External API integration enabled for this website
    #[serde(default)]
    pub api_enabled: bool,
    #[serde(default)]
    pub guest_sync_enabled: bool,
    /// Address book the guests are synced into; unset means unmapped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_address_book: Option<String>,
    /// Display name used as the third CSV header column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_store_name: Option<String>,
    #[serde(default)]
    pub store_ids: Vec<i64>,
}

impl Website {
    /// Whether guests of this website should be exported
    ///
    /// Requires guest sync, a mapped address book and the API integration.
    pub fn accepts_guest_sync(&self) -> bool {
        let address_book_mapped = self
            .guest_address_book
            .as_deref()
            .is_some_and(|book| !book.trim().is_empty());

        address_book_mapped && self.guest_sync_enabled && self.api_enabled
    }

    /// Store name mapping for the CSV header, empty when not configured
    pub fn mapped_store_name(&self) -> &str {
        self.mapped_store_name.as_deref().unwrap_or_default()
    }
}

/// A sales order as seen by the sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_email: Option<String>,
    pub customer_is_guest: bool,
    pub store_id: i64,
    #[serde(default)]
    pub products: Vec<OrderedProduct>,
    /// Milliseconds since the Unix epoch, set once the order was queued
    pub imported_at: Option<i64>,
}

/// A product line referenced by a batched order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub id: i64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub price: f64,
}

/// An order prepared for the import queue
///
/// `products` is optional: orders without it contribute nothing to the
/// catalog refresh. Any other connector fields are carried untouched in
/// `fields` and end up in the queue payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOrder {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<OrderedProduct>>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl BatchOrder {
    /// Create an order without products or extra fields
    pub fn new(id: i64) -> Self {
        Self {
            id,
            products: None,
            fields: serde_json::Map::new(),
        }
    }

    /// Attach the ordered products
    pub fn with_products(mut self, products: Vec<OrderedProduct>) -> Self {
        self.products = Some(products);
        self
    }

    /// Attach an extra connector field
    pub fn with_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// The orders of one website inside a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteOrders {
    pub website_id: i64,
    pub orders: Vec<BatchOrder>,
}

/// Orders grouped by website, in the order the groups were first seen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WebsiteOrders>", into = "Vec<WebsiteOrders>")]
pub struct OrderBatch {
    groups: Vec<WebsiteOrders>,
}

impl OrderBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an order to its website group
    ///
    /// Orders are keyed by id inside a group: pushing an id that is already
    /// present replaces that order in place.
    pub fn push(&mut self, website_id: i64, order: BatchOrder) {
        let group = self.group_mut(website_id);

        match group.orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order,
            None => group.orders.push(order),
        }
    }

    fn group_mut(&mut self, website_id: i64) -> &mut WebsiteOrders {
        let index = match self
            .groups
            .iter()
            .position(|group| group.website_id == website_id)
        {
            Some(index) => index,
            None => {
                self.groups.push(WebsiteOrders {
                    website_id,
                    orders: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        &mut self.groups[index]
    }

    /// Website groups in batch order
    pub fn groups(&self) -> &[WebsiteOrders] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.orders.is_empty())
    }

    /// Total number of orders across all groups
    pub fn order_count(&self) -> usize {
        self.groups.iter().map(|group| group.orders.len()).sum()
    }

    /// Every order id, outer website order first, then order within the group
    pub fn order_ids(&self) -> Vec<i64> {
        self.groups
            .iter()
            .flat_map(|group| group.orders.iter().map(|order| order.id))
            .collect()
    }
}

impl From<Vec<WebsiteOrders>> for OrderBatch {
    fn from(groups: Vec<WebsiteOrders>) -> Self {
        let mut batch = Self::new();
        for group in groups {
            batch.group_mut(group.website_id);
            for order in group.orders {
                batch.push(group.website_id, order);
            }
        }
        batch
    }
}

impl From<OrderBatch> for Vec<WebsiteOrders> {
    fn from(batch: OrderBatch) -> Self {
        batch.groups
    }
}

/// Kind of data an import queue entry carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportType {
    Guest,
    Orders,
    Contact,
    Subscribers,
    Catalog,
}

impl ImportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::Orders => "Orders",
            Self::Contact => "Contact",
            Self::Subscribers => "Subscriber",
            Self::Catalog => "Catalog",
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing hint for the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportMode {
    /// Batched delivery
    Bulk,
    /// One record at a time
    Single,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bulk => "Bulk",
            Self::Single => "Single",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work handed to the import queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportQueueEntry {
    pub import_type: ImportType,
    /// Serialized records, or empty when a file carries the data
    pub payload: String,
    pub mode: ImportMode,
    pub website_id: i64,
    /// Export file name, empty when the payload carries the data
    pub filename: String,
}

impl ImportQueueEntry {
    /// Entry pointing the importer at a guest CSV export
    pub fn guest_file(website_id: i64, filename: &str) -> Self {
        Self {
            import_type: ImportType::Guest,
            payload: String::new(),
            mode: ImportMode::Bulk,
            website_id,
            filename: filename.to_string(),
        }
    }

    /// Entry carrying a website's orders as a JSON array
    pub fn orders(website_id: i64, orders: &[BatchOrder]) -> Result<Self> {
        Ok(Self {
            import_type: ImportType::Orders,
            payload: serde_json::to_string(orders)?,
            mode: ImportMode::Bulk,
            website_id,
            filename: String::new(),
        })
    }
}

/// Importer row status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportStatus {
    NotImported,
    Importing,
    Imported,
    Failed,
}

impl ImportStatus {
    pub fn code(&self) -> i64 {
        match self {
            Self::NotImported => 0,
            Self::Importing => 1,
            Self::Imported => 2,
            Self::Failed => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::NotImported),
            1 => Ok(Self::Importing),
            2 => Ok(Self::Imported),
            3 => Ok(Self::Failed),
            other => Err(Error::Validation(ValidationError::invalid_parameter(
                "import_status",
                &format!("unknown status code {other}"),
            ))),
        }
    }
}

/// Importer queue counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub not_imported: u64,
    pub importing: u64,
    pub imported: u64,
    pub failed: u64,
    /// Pending entries per import type, sorted by type name
    pub pending_by_type: Vec<(String, u64)>,
}

/// Timestamp helpers
pub mod time_utils {
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Convert SystemTime to milliseconds since Unix epoch
    pub fn system_time_to_millis(time: SystemTime) -> i64 {
        time.duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Get current time as milliseconds since Unix epoch
    pub fn now_millis() -> i64 {
        system_time_to_millis(SystemTime::now())
    }
}
