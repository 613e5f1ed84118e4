//! # Id Index
//!
//! Ordered list of record ids for one entity type. Insertion order defines
//! list order; an id is stored at most once.

use crate::domain::errors::SerializationError;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free sequence of record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdIndex {
    ids: Vec<String>,
}

impl IdIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Remove `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Ids in `[offset, offset + limit)` plus the offset of the next page.
    ///
    /// The next offset is `None` once the slice reaches the end of the index.
    pub fn page(&self, offset: usize, limit: usize) -> (&[String], Option<usize>) {
        let start = offset.min(self.ids.len());
        let end = start.saturating_add(limit).min(self.ids.len());
        let next = (end < self.ids.len()).then_some(end);
        (&self.ids[start..end], next)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(self).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    /// Decode from storage.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
