//! # Domain Errors
//!
//! Error types for the entity store.
//!
//! - `NotFound` is raised only after an existence check, never by mapping a
//!   lower-level miss.
//! - `Validation` wraps the shared [`ValidationError`] so route handlers can
//!   report it as a client error.
//! - Everything the store or codec reports is collapsed into `Store`; it is
//!   not retried or classified further.

use shared_types::ValidationError;
use thiserror::Error;

/// Errors that can occur during entity operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// No record with this id exists for the entity.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The record or request failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Opaque failure from the key-value store or the record codec.
    #[error("Store error: {message}")]
    Store { message: String },
}

impl EntityError {
    /// Shorthand for a `NotFound` on `entity`.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        EntityError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EntityError::NotFound { .. })
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for EntityError {
    fn from(err: KVStoreError) -> Self {
        EntityError::Store {
            message: err.to_string(),
        }
    }
}

/// Record or index encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl From<SerializationError> for EntityError {
    fn from(err: SerializationError) -> Self {
        EntityError::Store {
            message: err.to_string(),
        }
    }
}
