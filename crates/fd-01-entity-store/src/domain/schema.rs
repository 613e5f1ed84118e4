//! # Record Schema
//!
//! A concrete entity is a record type implementing [`Record`] plus an
//! [`EntitySchema`] naming its keys, its initial state and its seed data.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::TimestampMillis;

/// A value storable under `entityName:id`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The record's id, unique within its entity type.
    fn id(&self) -> &str;

    /// Force the id. Used so a mutated record always matches its key.
    fn set_id(&mut self, id: &str);

    /// Runs before every write. Derived fields are recomputed here.
    fn normalize(self) -> Self {
        self
    }
}

/// Static description of one entity type.
pub struct EntitySchema<T> {
    /// Record key prefix, e.g. `dispute`.
    pub entity_name: &'static str,
    /// Index key, e.g. `disputes`.
    pub index_name: &'static str,
    /// Value `mutate` starts from when the record is absent.
    pub initial_state: fn() -> T,
    /// Records written by `ensure_seed`, built against the current time.
    pub seed_data: fn(TimestampMillis) -> Vec<T>,
}

impl<T> Clone for EntitySchema<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntitySchema<T> {}

impl<T> std::fmt::Debug for EntitySchema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitySchema")
            .field("entity_name", &self.entity_name)
            .field("index_name", &self.index_name)
            .finish()
    }
}
