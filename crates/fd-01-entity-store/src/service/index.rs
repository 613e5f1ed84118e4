//! # Index Handle
//!
//! Loads, mutates and stores one entity's `IdIndex` and seed marker. Every
//! mutation is a read followed by a separate write.

use super::StoreContext;
use crate::domain::errors::EntityError;
use crate::domain::index::IdIndex;
use crate::domain::keys::KeyLayout;
use crate::ports::outbound::KeyValueStore;

const SEED_MARKER_VALUE: &[u8] = b"1";

/// Access to the index and seed marker of one entity type.
pub struct IndexHandle<KV> {
    ctx: StoreContext<KV>,
    index_key: String,
    marker_key: String,
}

impl<KV> Clone for IndexHandle<KV> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            index_key: self.index_key.clone(),
            marker_key: self.marker_key.clone(),
        }
    }
}

impl<KV: KeyValueStore> IndexHandle<KV> {
    pub fn new(ctx: StoreContext<KV>, entity_name: &str, index_name: &str) -> Self {
        Self {
            ctx,
            index_key: KeyLayout::index(index_name),
            marker_key: KeyLayout::seed_marker(entity_name),
        }
    }

    /// Current index; an absent key is an empty index.
    pub fn load(&self) -> Result<IdIndex, EntityError> {
        match self.ctx.read(&self.index_key)? {
            Some(bytes) => Ok(IdIndex::from_bytes(&bytes)?),
            None => Ok(IdIndex::new()),
        }
    }

    fn store(&self, index: &IdIndex) -> Result<(), EntityError> {
        self.ctx.write(&self.index_key, &index.to_bytes()?)
    }

    /// Append `id` unless present. Writes only when the index changed.
    pub fn add(&self, id: &str) -> Result<bool, EntityError> {
        let mut index = self.load()?;
        if !index.insert(id) {
            return Ok(false);
        }
        self.store(&index)?;
        Ok(true)
    }

    /// Drop `id`. Writes only when the index changed.
    pub fn remove(&self, id: &str) -> Result<bool, EntityError> {
        let mut index = self.load()?;
        if !index.remove(id) {
            return Ok(false);
        }
        self.store(&index)?;
        Ok(true)
    }

    pub fn is_seeded(&self) -> Result<bool, EntityError> {
        self.ctx.contains(&self.marker_key)
    }

    pub fn mark_seeded(&self) -> Result<(), EntityError> {
        self.ctx.write(&self.marker_key, SEED_MARKER_VALUE)
    }
}
