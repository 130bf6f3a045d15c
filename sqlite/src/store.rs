//! In-memory state holders for display layers.
//!
//! A store wraps a repository and keeps the last loaded records together
//! with a loading flag and the message of the last failure. Mutations
//! re-fetch the full list instead of patching it, so the held items always
//! match what the database returned last. Errors are recorded and then
//! returned unchanged.

use packing_core::{OrderCalculation, OrderCalculationPayload};
use tracing::warn;

use crate::error::Result;
use crate::repo::{CrudRepository, OrderRepository};

/// Loading flag and last error shared by all stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl StoreStatus {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        self.loading = false;
        if let Err(err) = &result {
            warn!(%err, "store operation failed");
            self.error = Some(err.to_string());
        }
        result
    }
}

/// List state for one entity family.
///
/// # Examples
///
/// ```
/// use packing_core::OrderPayload;
/// use packing_sqlite::{Database, EntityStore};
///
/// let db = Database::in_memory();
/// db.initialize().unwrap();
///
/// let mut orders = EntityStore::new(db.orders());
/// orders.create(&OrderPayload::new("2026-03-01")).unwrap();
/// assert_eq!(orders.items().len(), 1);
///
/// let err = orders.create(&OrderPayload::new("  ")).unwrap_err();
/// assert_eq!(orders.error(), Some(err.to_string().as_str()));
/// ```
pub struct EntityStore<R: CrudRepository> {
    repo: R,
    items: Vec<R::Record>,
    status: StoreStatus,
}

impl<R: CrudRepository> EntityStore<R> {
    /// Creates an empty store. Nothing is loaded until [`fetch_all`](Self::fetch_all).
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            items: Vec::new(),
            status: StoreStatus::default(),
        }
    }

    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.status.loading
    }

    /// Message of the most recent failure, cleared when the next operation starts.
    pub fn error(&self) -> Option<&str> {
        self.status.error.as_deref()
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replaces the held items with a fresh list.
    pub fn fetch_all(&mut self) -> Result<()> {
        self.status.begin();
        let result = self.reload();
        self.status.finish(result)
    }

    /// Loads one record and merges it into the held items.
    ///
    /// A record already held is replaced in place; a new one is put first.
    pub fn fetch_one(&mut self, id: i64) -> Result<Option<&R::Record>> {
        self.status.begin();
        let result = self.repo.get_by_id(id);
        let record = self.status.finish(result)?;

        let Some(record) = record else {
            return Ok(None);
        };
        let index = match self.position(id) {
            Some(index) => {
                self.items[index] = record;
                index
            }
            None => {
                self.items.insert(0, record);
                0
            }
        };
        Ok(self.items.get(index))
    }

    /// Creates a record and re-fetches the list. Returns the new identity.
    pub fn create(&mut self, payload: &R::Payload) -> Result<i64> {
        self.status.begin();
        let result = self
            .repo
            .create(payload)
            .and_then(|id| self.reload().map(|()| id));
        self.status.finish(result)
    }

    /// Updates a record and re-fetches the list.
    pub fn update(&mut self, id: i64, payload: &R::Payload) -> Result<bool> {
        self.status.begin();
        let result = self
            .repo
            .update(id, payload)
            .and_then(|changed| self.reload().map(|()| changed));
        self.status.finish(result)
    }

    /// Removes a record and drops it from the held items.
    pub fn remove(&mut self, id: i64) -> Result<bool> {
        self.status.begin();
        let result = self.repo.remove(id);
        let removed = self.status.finish(result)?;
        self.items.retain(|item| R::record_id(item) != id);
        Ok(removed)
    }

    fn reload(&mut self) -> Result<()> {
        self.items = self.repo.list()?;
        Ok(())
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| R::record_id(item) == id)
    }
}

/// Calculations of the currently selected order.
pub struct CalculationStore<'a> {
    repo: OrderRepository<'a>,
    order_id: Option<i64>,
    items: Vec<OrderCalculation>,
    status: StoreStatus,
}

impl<'a> CalculationStore<'a> {
    pub fn new(repo: OrderRepository<'a>) -> Self {
        Self {
            repo,
            order_id: None,
            items: Vec::new(),
            status: StoreStatus::default(),
        }
    }

    pub fn items(&self) -> &[OrderCalculation] {
        &self.items
    }

    /// Order whose calculations are held, once one has been fetched.
    pub fn order_id(&self) -> Option<i64> {
        self.order_id
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    /// Loads the calculations of `order_id`, replacing any held ones.
    pub fn fetch(&mut self, order_id: i64) -> Result<()> {
        self.status.begin();
        let result = self.reload(order_id);
        self.status.finish(result)
    }

    /// Stores a calculation and re-fetches the list for its order.
    pub fn create(&mut self, payload: &OrderCalculationPayload) -> Result<i64> {
        self.status.begin();
        let result = self
            .repo
            .create_calculation(payload)
            .and_then(|id| self.reload(payload.order_id).map(|()| id));
        self.status.finish(result)
    }

    fn reload(&mut self, order_id: i64) -> Result<()> {
        self.items = self.repo.list_calculations(order_id)?;
        self.order_id = Some(order_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use packing_core::{ContainerPayload, OrderPayload};

    use super::*;
    use crate::database::Database;

    fn setup() -> Database {
        let db = Database::in_memory();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_fetch_all_loads_items() {
        let db = setup();
        db.containers()
            .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
            .unwrap();

        let mut store = EntityStore::new(db.containers());
        assert!(store.items().is_empty());
        store.fetch_all().unwrap();
        assert_eq!(store.items().len(), 1);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_fetch_one_replaces_or_prepends() {
        let db = setup();
        let mut store = EntityStore::new(db.containers());
        let first = store
            .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
            .unwrap();

        // Changed behind the store's back.
        db.containers()
            .update(first, &ContainerPayload::new("20ft OT", 5.9, 2.35, 2.39))
            .unwrap();
        let second = db
            .containers()
            .create(&ContainerPayload::new("40ft", 12.03, 2.35, 2.39))
            .unwrap();

        let name = store.fetch_one(first).unwrap().map(|c| c.name.clone());
        assert_eq!(name.as_deref(), Some("20ft OT"));
        assert_eq!(store.items().len(), 1);

        store.fetch_one(second).unwrap();
        assert_eq!(store.items()[0].id, second);
        assert_eq!(store.items().len(), 2);

        assert!(store.fetch_one(999).unwrap().is_none());
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn test_failed_create_records_error_and_keeps_items() {
        let db = setup();
        let mut store = EntityStore::new(db.containers());
        store
            .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
            .unwrap();

        let err = store
            .create(&ContainerPayload::new("", 5.9, 2.35, 2.39))
            .unwrap_err();
        assert_eq!(store.error(), Some(err.to_string().as_str()));
        assert_eq!(store.items().len(), 1);
        assert!(!store.is_loading());

        store.fetch_all().unwrap();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_remove_drops_item_locally() {
        let db = setup();
        let mut store = EntityStore::new(db.orders());
        let id = store.create(&OrderPayload::new("2026-03-01")).unwrap();
        store.create(&OrderPayload::new("2026-03-02")).unwrap();

        assert!(store.remove(id).unwrap());
        assert_eq!(store.items().len(), 1);
        assert!(store.items().iter().all(|o| o.id != id));
    }

    #[test]
    fn test_update_refetches() {
        let db = setup();
        let mut store = EntityStore::new(db.orders());
        let id = store.create(&OrderPayload::new("2026-03-01")).unwrap();

        assert!(store
            .update(id, &OrderPayload::new("2026-04-01").with_order_number("PO-9"))
            .unwrap());
        assert_eq!(store.items()[0].order_date, "2026-04-01");
        assert_eq!(store.items()[0].order_number.as_deref(), Some("PO-9"));
    }

    #[test]
    fn test_unavailable_host_is_recorded() {
        let db = Database::new(crate::Guard::preview(), crate::DbLocation::Memory);
        let mut store = EntityStore::new(db.transformers());

        assert!(store.fetch_all().is_err());
        assert!(store.error().unwrap().contains("unavailable"));
    }

    #[test]
    fn test_calculation_store_refetches_for_order() {
        let db = setup();
        let order_id = db.orders().create(&OrderPayload::new("2026-03-01")).unwrap();

        let mut store = CalculationStore::new(db.orders());
        store.fetch(order_id).unwrap();
        assert!(store.items().is_empty());
        assert_eq!(store.order_id(), Some(order_id));

        store
            .create(
                &OrderCalculationPayload::new(order_id, [12.0, 2.3, 2.6], [1.2, 0.9, 1.4])
                    .with_stacking(true),
            )
            .unwrap();
        assert_eq!(store.items().len(), 1);
        assert!(store.items()[0].stacking_enabled);
    }
}
