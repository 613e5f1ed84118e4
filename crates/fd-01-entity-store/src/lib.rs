//! # Indexed Entity Store (fd-01)
//!
//! Generic keyed CRUD for JSON records over a key-value store, plus a
//! per-entity secondary index used for listing, cursor pagination and
//! seed-data bootstrapping.
//!
//! ## Layout in the Key-Value Store
//!
//! ```text
//! dispute:disp_1        -> JSON Dispute          (one key per record)
//! dispute:disp_2        -> JSON Dispute
//! disputes              -> ["disp_1","disp_2"]   (one key per index, bincode)
//! __seed__:dispute      -> "1"                   (one key per seed marker)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Stable Keys | A record lives at `entityName:id` and nowhere else |
//! | 2 | Unique Index Entries | An id appears at most once in its index |
//! | 3 | Insertion Order | List order is the order ids were first indexed |
//! | 4 | Seed Once | Seed data is written only while the marker is unset |
//! | 5 | Stale Tolerance | Indexed ids without a record are skipped by `list` |
//!
//! There is no locking across store operations: `mutate` is read-then-write
//! and the index is updated in a separate write after the record.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Keys, index, cursor, schema and error types
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - Key-value store and clock implementations
//! - `service/` - `RecordStore` (Entity) and `IndexedStore` (Indexed Entity)
//! - `entities/` - Concrete schemas and seed data
//!
//! ## Usage
//!
//! ```ignore
//! use fd_01_entity_store::{adapters::InMemoryKVStore, entities, EntityStoreApi, StoreContext};
//!
//! let ctx = StoreContext::with_system_clock(InMemoryKVStore::new());
//! let disputes = entities::disputes(ctx);
//! disputes.ensure_seed()?;
//! let page = disputes.list(None, Some(10))?;
//! ```

pub mod adapters;
pub mod domain;
pub mod entities;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export key types for convenience
pub use domain::errors::{EntityError, KVStoreError};
pub use domain::schema::{EntitySchema, Record};
pub use domain::{Cursor, DEFAULT_PAGE_LIMIT};
pub use ports::inbound::EntityStoreApi;
pub use ports::outbound::{DynKVStore, KeyValueStore, TimeSource};
pub use service::{IndexedStore, RecordStore, StoreContext};
