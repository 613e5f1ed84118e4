//! # Domain Layer
//!
//! Pure domain logic for the entity store. No I/O happens here.
//!
//! ## Modules
//!
//! - `keys` - Store key layout for records, indexes and seed markers
//! - `index` - Ordered, duplicate-free id list
//! - `cursor` - Opaque pagination cursor
//! - `schema` - `Record` trait and per-entity `EntitySchema`
//! - `errors` - Domain error types

pub mod cursor;
pub mod errors;
pub mod index;
pub mod keys;
pub mod schema;

pub use cursor::Cursor;
pub use index::IdIndex;
pub use keys::KeyLayout;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
