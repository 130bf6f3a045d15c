use packing_core::{Transformer, TransformerPayload, validate_transformer};
use rusqlite::params;
use tracing::debug;

use super::{CrudRepository, ensure_valid};
use crate::convert::{delete_record, find_record, inserted_id, list_records};
use crate::database::Database;
use crate::error::Result;

/// Transformer persistence. Same statement shapes as containers, with
/// `weight` in place of `max_weight`.
pub struct TransformerRepository<'a> {
    db: &'a Database,
}

impl<'a> TransformerRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl CrudRepository for TransformerRepository<'_> {
    type Record = Transformer;
    type Payload = TransformerPayload;

    fn list(&self) -> Result<Vec<Transformer>> {
        self.db.with_connection(list_records::<Transformer>)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Transformer>> {
        self.db.with_connection(|conn| find_record(conn, id))
    }

    fn create(&self, payload: &TransformerPayload) -> Result<i64> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_transformer(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "INSERT INTO transformers (name, length, width, height, weight, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    payload.name.trim(),
                    payload.length,
                    payload.width,
                    payload.height,
                    payload.weight,
                    payload.notes,
                ],
            )?;
            let id = inserted_id(conn, changed, "transformer")?;
            debug!(id, "created transformer");
            Ok(id)
        })
    }

    fn update(&self, id: i64, payload: &TransformerPayload) -> Result<bool> {
        self.db.guard().ensure_available()?;
        ensure_valid(validate_transformer(payload))?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE transformers SET name = ?1, length = ?2, width = ?3, height = ?4, \
                 weight = ?5, notes = ?6, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now') \
                 WHERE id = ?7",
                params![
                    payload.name.trim(),
                    payload.length,
                    payload.width,
                    payload.height,
                    payload.weight,
                    payload.notes,
                    id,
                ],
            )?;
            debug!(id, changed, "updated transformer");
            Ok(changed > 0)
        })
    }

    fn remove(&self, id: i64) -> Result<bool> {
        self.db.with_connection(|conn| {
            let removed = delete_record::<Transformer>(conn, id)?;
            debug!(id, removed, "removed transformer");
            Ok(removed)
        })
    }

    fn record_id(record: &Transformer) -> i64 {
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
    fn test_optional_fields_round_trip_as_none() {
        let db = setup();
        let repo = db.transformers();
        let id = repo
            .create(&TransformerPayload::new("TR-100", 0.8, 0.6, 1.1))
            .unwrap();

        let transformer = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(transformer.weight, None);
        assert_eq!(transformer.notes, None);
        assert!(!transformer.created_at.is_empty());
    }

    #[test]
    fn test_update_replaces_every_field() {
        let db = setup();
        let repo = db.transformers();
        let id = repo
            .create(
                &TransformerPayload::new("TR-500", 1.2, 0.9, 1.4)
                    .with_weight(850.0)
                    .with_notes("oil filled"),
            )
            .unwrap();

        repo.update(id, &TransformerPayload::new("TR-500 dry", 1.3, 1.0, 1.5))
            .unwrap();

        let transformer = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(transformer.name, "TR-500 dry");
        assert_eq!(transformer.length, 1.3);
        assert_eq!(transformer.weight, None);
        assert_eq!(transformer.notes, None);
    }

    #[test]
    fn test_remove_reports_whether_row_existed() {
        let db = setup();
        let repo = db.transformers();
        let id = repo
            .create(&TransformerPayload::new("TR-500", 1.2, 0.9, 1.4))
            .unwrap();

        assert!(repo.remove(id).unwrap());
        assert!(!repo.remove(id).unwrap());
        assert!(repo.get_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let db = setup();
        let err = db
            .transformers()
            .create(&TransformerPayload::new("\n", 1.2, 0.9, 1.4))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(db.status().unwrap().transformer_count, 0);
    }
}
