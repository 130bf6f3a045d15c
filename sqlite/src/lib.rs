//! SQLite persistence for the packing ledger.
//!
//! This crate stores the [`packing_core`] records in a local SQLite file
//! and exposes them through one repository per entity family.
//!
//! # Architecture
//!
//! - **`guard`** — host capability check run before every operation
//! - **`connection`** — one lazily opened connection per [`Database`]
//! - **`schema`** / **`migration`** — fixed DDL, applied idempotently
//! - **`convert`** — row ↔ record mapping, including the 0/1 boolean column
//! - **`repo`** — [`ContainerRepository`], [`TransformerRepository`],
//!   [`OrderRepository`] behind the [`CrudRepository`] contract
//! - **`store`** — in-memory state holders for display layers
//! - **`config`** — YAML [`StoreConfig`]
//!
//! # Quick start
//!
//! ```no_run
//! use packing_core::{OrderCalculationPayload, OrderPayload};
//! use packing_sqlite::{CrudRepository, Database, StoreConfig};
//!
//! let db = Database::boot(&StoreConfig::default()).unwrap();
//!
//! let orders = db.orders();
//! let order_id = orders.create(&OrderPayload::new("2026-03-01")).unwrap();
//! orders
//!     .create_calculation(
//!         &OrderCalculationPayload::new(order_id, [12.03, 2.35, 2.69], [1.2, 0.9, 1.4])
//!             .with_stacking(true)
//!             .with_total_fit(36),
//!     )
//!     .unwrap();
//!
//! for calc in orders.list_calculations(order_id).unwrap() {
//!     println!("{:?} fit {:?}", calc.orientation, calc.total_fit);
//! }
//! ```
//!
//! # Errors
//!
//! Failures are [`StoreError`]s; [`StoreError::kind`] groups them into
//! unavailable host, rejected payload, and store failure. A missing record
//! is never an error: lookups return `None` and update/remove return
//! `false`.

mod config;
mod connection;
mod convert;
mod database;
mod error;
mod guard;
mod migration;
mod repo;
mod schema;
mod store;

pub use config::{DEFAULT_DATABASE, StoreConfig};
pub use connection::{ConnectionProvider, DbLocation};
pub use database::Database;
pub use error::{ErrorKind, Result, StoreError};
pub use guard::{DesktopHost, Guard, HOST_ENV_VAR, HostCapability, HostMode, PreviewHost};
pub use migration::{SchemaStatus, drop_schema, initialize_schema, schema_status};
pub use repo::{ContainerRepository, CrudRepository, OrderRepository, TransformerRepository};
pub use store::{CalculationStore, EntityStore, StoreStatus};
