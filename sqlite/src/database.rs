//! The persistence entry point: a guard plus a lazily opened connection.

use rusqlite::Connection;
use tracing::info;

use crate::config::StoreConfig;
use crate::connection::{ConnectionProvider, DbLocation};
use crate::error::Result;
use crate::guard::Guard;
use crate::migration::{self, SchemaStatus};
use crate::repo::{ContainerRepository, OrderRepository, TransformerRepository};

/// Gated access to the ledger database.
///
/// Every operation, including the schema helpers, passes the [`Guard`]
/// before the connection is opened or used.
///
/// # Examples
///
/// ```
/// use packing_core::ContainerPayload;
/// use packing_sqlite::{CrudRepository, Database};
///
/// let db = Database::in_memory();
/// db.initialize().unwrap();
///
/// let id = db
///     .containers()
///     .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
///     .unwrap();
/// let container = db.containers().get_by_id(id).unwrap().unwrap();
/// assert_eq!(container.name, "20ft");
/// ```
#[derive(Debug)]
pub struct Database {
    guard: Guard,
    connection: ConnectionProvider,
}

impl Database {
    /// Creates a database handle. Nothing is opened yet.
    pub fn new(guard: Guard, location: DbLocation) -> Self {
        Self {
            guard,
            connection: ConnectionProvider::new(location),
        }
    }

    /// Desktop-guarded private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(Guard::desktop(), DbLocation::Memory)
    }

    /// Builds the database described by `config` and initializes the schema.
    ///
    /// When the configured host has no embedded store, initialization is
    /// skipped and the returned handle fails every operation with
    /// [`StoreError::Unavailable`](crate::StoreError::Unavailable).
    ///
    /// # Errors
    ///
    /// Returns the schema initialization error, if any.
    pub fn boot(config: &StoreConfig) -> Result<Self> {
        let db = Self::new(Guard::from_mode(config.host), config.location());
        if !db.guard.is_available() {
            info!(host = db.guard.host_name(), "host has no embedded store, skipping init");
            return Ok(db);
        }
        db.initialize()?;
        Ok(db)
    }

    /// Applies the schema. Safe to repeat.
    pub fn initialize(&self) -> Result<()> {
        self.with_connection(migration::initialize_schema)
    }

    /// Drops every table.
    pub fn reset(&self) -> Result<()> {
        self.with_connection(migration::drop_schema)
    }

    /// Reports table presence and row counts.
    pub fn status(&self) -> Result<SchemaStatus> {
        self.with_connection(migration::schema_status)
    }

    /// Runs `f` with the connection after passing the guard.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.guard.ensure_available()?;
        self.connection.with_connection(f)
    }

    /// Returns the availability guard.
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Returns `true` once the underlying connection has been opened.
    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    /// Returns the configured location.
    pub fn location(&self) -> &DbLocation {
        self.connection.location()
    }

    pub fn containers(&self) -> ContainerRepository<'_> {
        ContainerRepository::new(self)
    }

    pub fn transformers(&self) -> TransformerRepository<'_> {
        TransformerRepository::new(self)
    }

    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self)
    }
}
