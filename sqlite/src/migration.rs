//! Schema lifecycle: create, drop and inspect the ledger tables.
//!
//! [`initialize_schema`] runs once at startup and is safe to repeat.
//! [`drop_schema`] and [`schema_status`] back the administrative CLI
//! commands.

use rusqlite::Connection;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::schema::{DROP_SQL, SCHEMA_SQL, TABLES};

/// Creates all tables and indexes.
///
/// Uses `CREATE ... IF NOT EXISTS`, so it is safe to call on a database
/// that already has the schema. Executes within a transaction.
///
/// # Errors
///
/// Returns [`StoreError::MigrationError`] if the DDL fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(SCHEMA_SQL)
        .map_err(|e| StoreError::MigrationError(format!("failed to create tables: {e}")))?;
    tx.commit()?;
    info!("schema ready");
    Ok(())
}

/// Drops all tables in reverse dependency order.
///
/// Safe to call when the tables do not exist. Executes within a transaction.
pub fn drop_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(DROP_SQL)
        .map_err(|e| StoreError::MigrationError(format!("failed to drop tables: {e}")))?;
    tx.commit()?;
    info!("schema dropped");
    Ok(())
}

/// Reports whether the tables exist and how many rows each holds.
pub fn schema_status(conn: &Connection) -> Result<SchemaStatus> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            return Ok(SchemaStatus::default());
        }
    }

    Ok(SchemaStatus {
        tables_exist: true,
        container_count: count_rows(conn, "containers")?,
        transformer_count: count_rows(conn, "transformers")?,
        order_count: count_rows(conn, "orders")?,
        calculation_count: count_rows(conn, "order_calculations")?,
    })
}

fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count as usize)
}

/// Snapshot of the schema state, returned by [`schema_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether all four tables exist.
    pub tables_exist: bool,
    pub container_count: usize,
    pub transformer_count: usize,
    pub order_count: usize,
    pub calculation_count: usize,
}
