use packing_core::{
    Order, OrderCalculation, OrderCalculationPayload, OrderPayload, validate_calculation,
    validate_order,
};
use rusqlite::params;
use tracing::debug;

use super::{CrudRepository, ensure_valid};
use crate::convert::{
    bool_to_sql, delete_record, find_record, inserted_id, list_records, list_records_where,
};
use crate::database::Database;
use crate::error::Result;

/// Order persistence, including the calculations recorded per order.
///
/// Removing an order also removes its calculations.
pub struct OrderRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Returns the calculations recorded for `order_id`, newest first.
    pub fn list_calculations(&self, order_id: i64) -> Result<Vec<OrderCalculation>> {
        self.db
            .with_connection(|conn| list_records_where(conn, "order_id", order_id))
    }

    /// Returns one calculation by identity.
    pub fn get_calculation(&self, id: i64) -> Result<Option<OrderCalculation>> {
        self.db.with_connection(|conn| find_record(conn, id))
    }

    /// Validates and stores a calculation, returning its identity.
    ///
    /// The container and transformer fields are stored exactly as given;
    /// they are not looked up from the referenced records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatabaseError`](crate::StoreError::DatabaseError) when
    /// `order_id` does not reference an existing order.
    pub fn create_calculation(&self, payload: &OrderCalculationPayload) -> Result<i64> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_calculation(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "INSERT INTO order_calculations (
                    order_id, container_id, transformer_id,
                    container_name, container_length, container_width, container_height, container_max_weight,
                    transformer_name, transformer_length, transformer_width, transformer_height, transformer_weight,
                    stacking_enabled, orientation, total_fit, notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                params![
                    payload.order_id,
                    payload.container_id,
                    payload.transformer_id,
                    payload.container_name,
                    payload.container_length,
                    payload.container_width,
                    payload.container_height,
                    payload.container_max_weight,
                    payload.transformer_name,
                    payload.transformer_length,
                    payload.transformer_width,
                    payload.transformer_height,
                    payload.transformer_weight,
                    bool_to_sql(payload.stacking_enabled),
                    payload.orientation,
                    payload.total_fit,
                    payload.notes,
                ],
            )?;
            let id = inserted_id(conn, changed, "order calculation")?;
            debug!(id, order_id = payload.order_id, "created order calculation");
            Ok(id)
        })
    }

    /// Deletes one calculation. Returns `false` when it did not exist.
    pub fn remove_calculation(&self, id: i64) -> Result<bool> {
        self.db
            .with_connection(|conn| delete_record::<OrderCalculation>(conn, id))
    }
}

impl CrudRepository for OrderRepository<'_> {
    type Record = Order;
    type Payload = OrderPayload;

    fn list(&self) -> Result<Vec<Order>> {
        self.db.with_connection(list_records::<Order>)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Order>> {
        self.db.with_connection(|conn| find_record(conn, id))
    }

    fn create(&self, payload: &OrderPayload) -> Result<i64> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_order(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "INSERT INTO orders (order_number, order_date, notes) VALUES (?1, ?2, ?3)",
                params![
                    payload.order_number,
                    payload.order_date.trim(),
                    payload.notes
                ],
            )?;
            let id = inserted_id(conn, changed, "order")?;
            debug!(id, "created order");
            Ok(id)
        })
    }

    fn update(&self, id: i64, payload: &OrderPayload) -> Result<bool> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_order(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE orders SET order_number = ?1, order_date = ?2, notes = ?3 WHERE id = ?4",
                params![
                    payload.order_number,
                    payload.order_date.trim(),
                    payload.notes,
                    id
                ],
            )?;
            debug!(id, changed, "updated order");
            Ok(changed > 0)
        })
    }

    fn remove(&self, id: i64) -> Result<bool> {
        self.db.with_connection(|conn| {
            let removed = delete_record::<Order>(conn, id)?;
            debug!(id, removed, "removed order");
            Ok(removed)
        })
    }

    fn record_id(record: &Order) -> i64 {
        record.id
    }
}
