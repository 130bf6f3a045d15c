//! Conversion between SQLite rows and ledger records.
//!
//! Each record kind implements [`Record`], which names its table and
//! columns and maps a row back into the typed record. The generic helpers
//! here cover the statements that are identical across tables (list,
//! lookup, delete); repositories keep their own INSERT and UPDATE
//! statements because the bound columns differ.
//!
//! This is the only place where `stacking_enabled` exists as an integer.

use packing_core::{Container, Order, OrderCalculation, Transformer};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{Result, StoreError};

/// Converts a boolean to the stored 0/1 form.
pub(crate) const fn bool_to_sql(value: bool) -> i64 {
    if value { 1 } else { 0 }
}

/// Converts the stored 0/1 form back to a boolean. Only `1` is true.
pub(crate) const fn sql_to_bool(value: i64) -> bool {
    value == 1
}

/// A typed record stored in one table.
pub(crate) trait Record: Sized {
    /// Table name.
    const TABLE: &'static str;
    /// Comma-separated column list read by [`from_row`](Self::from_row).
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl Record for Container {
    const TABLE: &'static str = "containers";
    const COLUMNS: &'static str =
        "id, name, length, width, height, max_weight, notes, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            length: row.get("length")?,
            width: row.get("width")?,
            height: row.get("height")?,
            max_weight: row.get("max_weight")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

impl Record for Transformer {
    const TABLE: &'static str = "transformers";
    const COLUMNS: &'static str =
        "id, name, length, width, height, weight, notes, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            length: row.get("length")?,
            width: row.get("width")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

impl Record for Order {
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static str = "id, order_number, order_date, notes, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            order_number: row.get("order_number")?,
            order_date: row.get("order_date")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl Record for OrderCalculation {
    const TABLE: &'static str = "order_calculations";
    const COLUMNS: &'static str = "id, order_id, container_id, transformer_id, \
         container_name, container_length, container_width, container_height, container_max_weight, \
         transformer_name, transformer_length, transformer_width, transformer_height, transformer_weight, \
         stacking_enabled, orientation, total_fit, notes, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            order_id: row.get("order_id")?,
            container_id: row.get("container_id")?,
            transformer_id: row.get("transformer_id")?,
            container_name: row.get("container_name")?,
            container_length: row.get("container_length")?,
            container_width: row.get("container_width")?,
            container_height: row.get("container_height")?,
            container_max_weight: row.get("container_max_weight")?,
            transformer_name: row.get("transformer_name")?,
            transformer_length: row.get("transformer_length")?,
            transformer_width: row.get("transformer_width")?,
            transformer_height: row.get("transformer_height")?,
            transformer_weight: row.get("transformer_weight")?,
            stacking_enabled: sql_to_bool(row.get("stacking_enabled")?),
            orientation: row.get("orientation")?,
            total_fit: row.get("total_fit")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Loads every row of `R`'s table, newest first.
///
/// Rows created within the same millisecond are ordered by descending id,
/// which keeps reverse insertion order.
pub(crate) fn list_records<R: Record>(conn: &Connection) -> Result<Vec<R>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM {} ORDER BY created_at DESC, id DESC",
        R::COLUMNS,
        R::TABLE
    ))?;
    let records = stmt
        .query_map([], |row| R::from_row(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Loads rows of `R`'s table whose `column` equals `value`, newest first.
pub(crate) fn list_records_where<R: Record>(
    conn: &Connection,
    column: &str,
    value: i64,
) -> Result<Vec<R>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM {} WHERE {column} = ?1 ORDER BY created_at DESC, id DESC",
        R::COLUMNS,
        R::TABLE
    ))?;
    let records = stmt
        .query_map(params![value], |row| R::from_row(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Loads one row by identity. `None` when absent.
pub(crate) fn find_record<R: Record>(conn: &Connection, id: i64) -> Result<Option<R>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM {} WHERE id = ?1",
        R::COLUMNS,
        R::TABLE
    ))?;
    let record = stmt
        .query_row(params![id], |row| R::from_row(row))
        .optional()?;
    Ok(record)
}

/// Deletes one row by identity. Returns whether a row was removed.
pub(crate) fn delete_record<R: Record>(conn: &Connection, id: i64) -> Result<bool> {
    let rows = conn.execute(&format!("DELETE FROM {} WHERE id = ?1", R::TABLE), params![id])?;
    Ok(rows > 0)
}

/// Returns the identity generated by the INSERT that changed `changed` rows.
///
/// # Errors
///
/// Returns [`StoreError::PersistenceError`] when the insert did not report
/// exactly one new row with a positive identity.
pub(crate) fn inserted_id(conn: &Connection, changed: usize, entity: &str) -> Result<i64> {
    let id = conn.last_insert_rowid();
    if changed != 1 || id <= 0 {
        return Err(StoreError::PersistenceError(format!(
            "could not create {entity}: store reported no generated id"
        )));
    }
    Ok(id)
}
