use packing_core::{Container, ContainerPayload, validate_container};
use rusqlite::params;
use tracing::debug;

use super::{CrudRepository, ensure_valid};
use crate::convert::{delete_record, find_record, inserted_id, list_records};
use crate::database::Database;
use crate::error::Result;

/// Container persistence.
pub struct ContainerRepository<'a> {
    db: &'a Database,
}

impl<'a> ContainerRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl CrudRepository for ContainerRepository<'_> {
    type Record = Container;
    type Payload = ContainerPayload;

    fn list(&self) -> Result<Vec<Container>> {
        self.db.with_connection(list_records::<Container>)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Container>> {
        self.db.with_connection(|conn| find_record(conn, id))
    }

    fn create(&self, payload: &ContainerPayload) -> Result<i64> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_container(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "INSERT INTO containers (name, length, width, height, max_weight, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    payload.name.trim(),
                    payload.length,
                    payload.width,
                    payload.height,
                    payload.max_weight,
                    payload.notes,
                ],
            )?;
            let id = inserted_id(conn, changed, "container")?;
            debug!(id, "created container");
            Ok(id)
        })
    }

    fn update(&self, id: i64, payload: &ContainerPayload) -> Result<bool> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_container(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE containers SET name = ?1, length = ?2, width = ?3, height = ?4, \
                 max_weight = ?5, notes = ?6, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now') \
                 WHERE id = ?7",
                params![
                    payload.name.trim(),
                    payload.length,
                    payload.width,
                    payload.height,
                    payload.max_weight,
                    payload.notes,
                    id,
                ],
            )?;
            debug!(id, changed, "updated container");
            Ok(changed > 0)
        })
    }

    fn remove(&self, id: i64) -> Result<bool> {
        self.db.with_connection(|conn| {
            let removed = delete_record::<Container>(conn, id)?;
            debug!(id, removed, "removed container");
            Ok(removed)
        })
    }

    fn record_id(record: &Container) -> i64 {
        record.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn setup() -> Database {
        let db = Database::in_memory();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_create_trims_name() {
        let db = setup();
        let repo = db.containers();
        let id = repo
            .create(&ContainerPayload::new("  40ft HC  ", 12.03, 2.35, 2.69))
            .unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().name, "40ft HC");
    }

    #[test]
    fn test_update_sets_updated_at() {
        let db = setup();
        let repo = db.containers();
        let id = repo
            .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
            .unwrap();
        assert!(repo.get_by_id(id).unwrap().unwrap().updated_at.is_none());

        let changed = repo
            .update(id, &ContainerPayload::new("20ft", 5.9, 2.35, 2.39).with_max_weight(28_000.0))
            .unwrap();
        assert!(changed);

        let container = repo.get_by_id(id).unwrap().unwrap();
        assert!(container.updated_at.is_some());
        assert_eq!(container.max_weight, Some(28_000.0));
    }

    #[test]
    fn test_update_missing_returns_false() {
        let db = setup();
        let changed = db
            .containers()
            .update(99, &ContainerPayload::new("x", 1.0, 1.0, 1.0))
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let db = setup();
        let repo = db.containers();
        let id = repo
            .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
            .unwrap();

        let err = repo
            .update(id, &ContainerPayload::new("20ft", 5.9, -1.0, 2.39))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().width, 2.35);
    }

    #[test]
    fn test_create_on_missing_schema_is_database_error() {
        let db = Database::in_memory();
        let err = db
            .containers()
            .create(&ContainerPayload::new("20ft", 5.9, 2.35, 2.39))
            .unwrap_err();
        assert!(matches!(err, StoreError::DatabaseError(_)));
    }
}
