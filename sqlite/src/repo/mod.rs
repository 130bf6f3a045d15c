//! Repositories: one per entity family.
//!
//! All repositories borrow a [`Database`](crate::Database) and share the
//! [`CrudRepository`] contract. Every operation passes the availability
//! guard first; create and update validate the payload before any SQL
//! runs.

mod containers;
mod orders;
mod transformers;

pub use containers::ContainerRepository;
pub use orders::OrderRepository;
pub use transformers::TransformerRepository;

use packing_core::ValidationError;

use crate::error::Result;

/// Uniform list/get/create/update/remove contract.
pub trait CrudRepository {
    /// Stored record type.
    type Record;
    /// Create/update payload type.
    type Payload;

    /// Returns every record, newest first.
    fn list(&self) -> Result<Vec<Self::Record>>;

    /// Returns the record with identity `id`, or `None`.
    fn get_by_id(&self, id: i64) -> Result<Option<Self::Record>>;

    /// Validates and inserts `payload`, returning the generated identity.
    fn create(&self, payload: &Self::Payload) -> Result<i64>;

    /// Validates `payload` and replaces the record with identity `id`.
    ///
    /// Returns `false` when no record has that identity.
    fn update(&self, id: i64, payload: &Self::Payload) -> Result<bool>;

    /// Deletes the record with identity `id`.
    ///
    /// Returns `false` when no record has that identity.
    fn remove(&self, id: i64) -> Result<bool>;

    /// Returns the identity of a stored record.
    fn record_id(record: &Self::Record) -> i64;
}

/// Turns the first validation error, if any, into a failure.
pub(crate) fn ensure_valid(errors: Vec<ValidationError>) -> Result<()> {
    match errors.into_iter().next() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
