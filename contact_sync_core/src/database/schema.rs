//! Database schema definitions

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initial schema creation SQL
pub const SCHEMA_V1: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

-- Contacts known to the marketing platform
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL COLLATE NOCASE,
    website_id INTEGER NOT NULL,
    store_id INTEGER NOT NULL,
    is_guest BOOLEAN NOT NULL DEFAULT FALSE,
    email_imported BOOLEAN NOT NULL DEFAULT FALSE,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    UNIQUE(email, website_id)
);

-- Sales orders
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY,
    customer_email TEXT,
    customer_is_guest BOOLEAN NOT NULL DEFAULT FALSE,
    store_id INTEGER NOT NULL,
    imported_at INTEGER,
    created_at INTEGER NOT NULL
);

-- Ordered product lines
CREATE TABLE IF NOT EXISTS order_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    product_id INTEGER NOT NULL,
    sku TEXT NOT NULL DEFAULT '',
    name TEXT NOT NULL DEFAULT '',
    qty REAL NOT NULL DEFAULT 0,
    price REAL NOT NULL DEFAULT 0,
    FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE
);

-- Import queue consumed by the bulk importer
CREATE TABLE IF NOT EXISTS email_importer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    import_type TEXT NOT NULL,
    import_data TEXT NOT NULL DEFAULT '',
    import_mode TEXT NOT NULL,
    website_id INTEGER NOT NULL,
    import_file TEXT NOT NULL DEFAULT '',
    import_status INTEGER NOT NULL DEFAULT 0,
    message TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Catalog rows waiting to be re-exported
CREATE TABLE IF NOT EXISTS email_catalog (
    product_id INTEGER PRIMARY KEY,
    processed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_contacts_guest_pending ON contacts(website_id, is_guest, email_imported);
CREATE INDEX IF NOT EXISTS idx_orders_guest ON orders(customer_is_guest, customer_email);
CREATE INDEX IF NOT EXISTS idx_orders_imported ON orders(imported_at);
CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id);
CREATE INDEX IF NOT EXISTS idx_email_importer_status ON email_importer(import_status, import_type);
"#;
