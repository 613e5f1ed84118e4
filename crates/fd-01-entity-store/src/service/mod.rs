//! # Entity Store Service
//!
//! ## Architecture
//!
//! ```text
//! IndexedStore<T, KV>            implements EntityStoreApi<T>
//!   ├── RecordStore<T, KV>       entityName:id  -> JSON record
//!   └── IndexHandle<KV>          indexName      -> IdIndex
//!                                __seed__:name  -> marker
//!            │
//!            ▼
//!      StoreContext<KV>          shared store + clock, cloned into every entity
//! ```
//!
//! The index capability wraps the record capability; neither knows about the
//! HTTP layer.

mod context;
mod index;
mod indexed;
mod record;

pub use context::StoreContext;
pub use index::IndexHandle;
pub use indexed::IndexedStore;
pub use record::RecordStore;
