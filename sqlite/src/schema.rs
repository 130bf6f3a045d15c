//! Fixed SQL schema for the ledger tables.
//!
//! # Table structure
//!
//! - `containers` — container records with inner dimensions
//! - `transformers` — transformer records with unit dimensions
//! - `orders` — dated orders
//! - `order_calculations` — packing results per order, with a denormalized
//!   snapshot of the container and transformer used
//!
//! `order_calculations.order_id` cascades on order deletion.
//! `container_id` and `transformer_id` are deliberately plain integers so a
//! calculation survives deletion of its source records.
//!
//! Timestamps are UTC text with millisecond precision
//! (`YYYY-MM-DD HH:MM:SS.SSS`).

/// Table names in dependency order.
pub(crate) const TABLES: [&str; 4] = ["containers", "transformers", "orders", "order_calculations"];

/// Creates all tables and indexes. Every statement is `IF NOT EXISTS`.
pub(crate) const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS containers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    length REAL NOT NULL CHECK (length > 0),
    width REAL NOT NULL CHECK (width > 0),
    height REAL NOT NULL CHECK (height > 0),
    max_weight REAL,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS transformers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    length REAL NOT NULL CHECK (length > 0),
    width REAL NOT NULL CHECK (width > 0),
    height REAL NOT NULL CHECK (height > 0),
    weight REAL,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_number TEXT,
    order_date TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

CREATE TABLE IF NOT EXISTS order_calculations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    container_id INTEGER,
    transformer_id INTEGER,
    container_name TEXT,
    container_length REAL NOT NULL,
    container_width REAL NOT NULL,
    container_height REAL NOT NULL,
    container_max_weight REAL,
    transformer_name TEXT,
    transformer_length REAL NOT NULL,
    transformer_width REAL NOT NULL,
    transformer_height REAL NOT NULL,
    transformer_weight REAL,
    stacking_enabled INTEGER NOT NULL DEFAULT 0 CHECK (stacking_enabled IN (0, 1)),
    orientation TEXT,
    total_fit INTEGER,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_containers_created ON containers(created_at);
CREATE INDEX IF NOT EXISTS idx_transformers_created ON transformers(created_at);
CREATE INDEX IF NOT EXISTS idx_orders_created ON orders(created_at);
CREATE INDEX IF NOT EXISTS idx_order_calculations_order ON order_calculations(order_id, created_at);
"#;

/// Drops all tables in reverse dependency order.
pub(crate) const DROP_SQL: &str = r#"
DROP TABLE IF EXISTS order_calculations;
DROP TABLE IF EXISTS orders;
DROP TABLE IF EXISTS transformers;
DROP TABLE IF EXISTS containers;
"#;
