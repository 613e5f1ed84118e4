//! # Inbound Ports (Driving Ports)
//!
//! The operations route handlers call on an indexed entity.

use crate::domain::errors::EntityError;
use shared_types::Page;

/// Keyed CRUD plus index-backed listing for one entity type.
///
/// Record state per id is either absent or present:
///
/// ```text
/// absent  --create-->  present
/// present --mutate-->  present
/// present --delete-->  absent
/// absent  --delete-->  absent   (no-op, returns false)
/// ```
pub trait EntityStoreApi<T> {
    /// Read the record stored under `id`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no record with this id
    /// - `Store`: the store or codec failed
    fn get(&self, id: &str) -> Result<T, EntityError>;

    /// Write `value` under its id, overwriting any previous record, and
    /// append the id to the index if it is not there yet.
    ///
    /// ## Errors
    ///
    /// - `Validation(EmptyId)`: the record id is empty
    /// - `Store`: the store or codec failed
    fn create(&self, value: T) -> Result<T, EntityError>;

    /// Whether a record exists under `id`.
    fn exists(&self, id: &str) -> Result<bool, EntityError>;

    /// Remove the record and its index entry. Returns whether a record was
    /// removed.
    fn delete(&self, id: &str) -> Result<bool, EntityError>;

    /// Read the record (or the initial state when absent), apply `f`, write
    /// the result and return it.
    ///
    /// This is a plain read followed by a write. Concurrent mutations of the
    /// same id may lose updates.
    fn mutate<F>(&self, id: &str, f: F) -> Result<T, EntityError>
    where
        F: FnOnce(T) -> T;

    /// One page of records in index order.
    ///
    /// `cursor` comes from a previous page's `next_cursor`; `None` starts at
    /// the beginning. `limit` defaults to [`crate::DEFAULT_PAGE_LIMIT`] and is
    /// at least 1. Indexed ids without a record are skipped.
    ///
    /// ## Errors
    ///
    /// - `Validation(InvalidCursor)`: the cursor does not decode
    /// - `Store`: the store or codec failed
    fn list(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<Page<T>, EntityError>;

    /// Write the seed data once. Later calls are no-ops.
    fn ensure_seed(&self) -> Result<(), EntityError>;
}
