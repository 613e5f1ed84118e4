//! # Record Store (Entity)
//!
//! Binds a record type to the key `entityName:id`. Knows nothing about
//! indexes.

use super::StoreContext;
use crate::domain::errors::{EntityError, SerializationError};
use crate::domain::keys::KeyLayout;
use crate::domain::schema::{EntitySchema, Record};
use crate::ports::outbound::KeyValueStore;
use shared_types::ValidationError;
use std::marker::PhantomData;

/// Keyed CRUD for one entity type.
pub struct RecordStore<T, KV> {
    ctx: StoreContext<KV>,
    schema: EntitySchema<T>,
    _record: PhantomData<fn() -> T>,
}

impl<T, KV> Clone for RecordStore<T, KV> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            schema: self.schema,
            _record: PhantomData,
        }
    }
}

impl<T, KV> RecordStore<T, KV>
where
    T: Record,
    KV: KeyValueStore,
{
    pub fn new(ctx: StoreContext<KV>, schema: EntitySchema<T>) -> Self {
        Self {
            ctx,
            schema,
            _record: PhantomData,
        }
    }

    pub fn schema(&self) -> &EntitySchema<T> {
        &self.schema
    }

    pub fn context(&self) -> &StoreContext<KV> {
        &self.ctx
    }

    fn key(&self, id: &str) -> String {
        KeyLayout::record(self.schema.entity_name, id)
    }

    /// Read the record, `None` if absent.
    pub fn find(&self, id: &str) -> Result<Option<T>, EntityError> {
        match self.ctx.read(&self.key(id))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Read the record, `NotFound` if absent.
    pub fn get(&self, id: &str) -> Result<T, EntityError> {
        self.find(id)?
            .ok_or_else(|| EntityError::not_found(self.schema.entity_name, id))
    }

    /// Normalize and write `value` under its own id, overwriting.
    pub fn create(&self, value: T) -> Result<T, EntityError> {
        if value.id().is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        let value = value.normalize();
        self.ctx.write(&self.key(value.id()), &encode(&value)?)?;
        Ok(value)
    }

    pub fn exists(&self, id: &str) -> Result<bool, EntityError> {
        self.ctx.contains(&self.key(id))
    }

    /// Remove the record. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool, EntityError> {
        self.ctx.remove(&self.key(id))
    }

    /// Read (or start from the initial state), apply `f`, write back.
    ///
    /// No compare-and-swap: a concurrent writer between the read and the
    /// write is overwritten.
    pub fn mutate<F>(&self, id: &str, f: F) -> Result<T, EntityError>
    where
        F: FnOnce(T) -> T,
    {
        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        let current = self
            .find(id)?
            .unwrap_or_else(|| (self.schema.initial_state)());

        let mut next = f(current);
        next.set_id(id);
        let next = next.normalize();

        self.ctx.write(&self.key(id), &encode(&next)?)?;
        Ok(next)
    }
}

fn encode<T: Record>(value: &T) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(value).map_err(|e| SerializationError {
        message: e.to_string(),
    })
}

fn decode<T: Record>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError {
        message: e.to_string(),
    })
}
