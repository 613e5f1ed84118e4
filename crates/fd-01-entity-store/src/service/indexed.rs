//! # Indexed Store (Indexed Entity)
//!
//! Composes a `RecordStore` with an `IndexHandle` and implements
//! `EntityStoreApi`.

use super::{IndexHandle, RecordStore, StoreContext};
use crate::domain::cursor::Cursor;
use crate::domain::errors::EntityError;
use crate::domain::schema::{EntitySchema, Record};
use crate::domain::DEFAULT_PAGE_LIMIT;
use crate::ports::inbound::EntityStoreApi;
use crate::ports::outbound::KeyValueStore;
use shared_types::Page;

/// Records of one type plus their listing index.
pub struct IndexedStore<T, KV> {
    records: RecordStore<T, KV>,
    index: IndexHandle<KV>,
}

impl<T, KV> Clone for IndexedStore<T, KV> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T, KV> IndexedStore<T, KV>
where
    T: Record,
    KV: KeyValueStore,
{
    pub fn new(ctx: StoreContext<KV>, schema: EntitySchema<T>) -> Self {
        let index = IndexHandle::new(ctx.clone(), schema.entity_name, schema.index_name);
        Self {
            records: RecordStore::new(ctx, schema),
            index,
        }
    }

    /// The unindexed record capability.
    pub fn records(&self) -> &RecordStore<T, KV> {
        &self.records
    }

    /// The index capability.
    pub fn index(&self) -> &IndexHandle<KV> {
        &self.index
    }

    pub fn entity_name(&self) -> &'static str {
        self.records.schema().entity_name
    }

    /// Current time from the underlying store context.
    pub fn now_millis(&self) -> shared_types::TimestampMillis {
        self.records.context().now_millis()
    }

    /// `list` with an already decoded cursor. `limit` is raised to at least 1.
    pub fn list_page(&self, cursor: Cursor, limit: usize) -> Result<Page<T>, EntityError> {
        let limit = limit.max(1);

        let index = self.index.load()?;
        let (ids, next) = index.page(cursor.offset(), limit);

        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            match self.records.find(id)? {
                Some(record) => items.push(record),
                None => {
                    #[cfg(feature = "tracing-log")]
                    tracing::warn!(
                        "[fd-01] index {} lists {} but no record exists; skipping",
                        self.entity_name(),
                        id
                    );
                }
            }
        }

        Ok(Page {
            items,
            next_cursor: next.map(|offset| Cursor::from_offset(offset).encode()),
        })
    }
}

impl<T, KV> EntityStoreApi<T> for IndexedStore<T, KV>
where
    T: Record,
    KV: KeyValueStore,
{
    fn get(&self, id: &str) -> Result<T, EntityError> {
        self.records.get(id)
    }

    fn create(&self, value: T) -> Result<T, EntityError> {
        let stored = self.records.create(value)?;
        if self.index.add(stored.id())? {
            #[cfg(feature = "tracing-log")]
            tracing::debug!(
                "[fd-01] indexed {}:{}",
                self.entity_name(),
                stored.id()
            );
        }
        Ok(stored)
    }

    fn exists(&self, id: &str) -> Result<bool, EntityError> {
        self.records.exists(id)
    }

    fn delete(&self, id: &str) -> Result<bool, EntityError> {
        let removed = self.records.delete(id)?;
        self.index.remove(id)?;
        #[cfg(feature = "tracing-log")]
        tracing::debug!(
            "[fd-01] delete {}:{} removed={}",
            self.entity_name(),
            id,
            removed
        );
        Ok(removed)
    }

    fn mutate<F>(&self, id: &str, f: F) -> Result<T, EntityError>
    where
        F: FnOnce(T) -> T,
    {
        let was_present = self.records.exists(id)?;
        let next = self.records.mutate(id, f)?;
        if !was_present {
            self.index.add(id)?;
        }
        Ok(next)
    }

    fn list(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<Page<T>, EntityError> {
        let cursor = Cursor::parse(cursor)?;
        self.list_page(cursor, limit.unwrap_or(DEFAULT_PAGE_LIMIT))
    }

    fn ensure_seed(&self) -> Result<(), EntityError> {
        if self.index.is_seeded()? {
            return Ok(());
        }

        let seed = (self.records.schema().seed_data)(self.now_millis());
        #[cfg(feature = "tracing-log")]
        let count = seed.len();
        for item in seed {
            self.create(item)?;
        }
        self.index.mark_seeded()?;

        #[cfg(feature = "tracing-log")]
        tracing::info!("[fd-01] seeded {} {} record(s)", count, self.entity_name());

        Ok(())
    }
}
