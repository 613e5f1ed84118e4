//! # Concrete Entities
//!
//! Schemas and seed data for the records this service stores.
//!
//! | Entity | Record key | Index | Seed |
//! |--------|------------|-------|------|
//! | Dispute | `dispute:{id}` | `disputes` | `disp_1`, `disp_2` |
//! | User | `user:{id}` | `users` | `u1`, `u2` |

mod dispute;
mod user;

pub use dispute::{seed_disputes, DISPUTES};
pub use user::{seed_users, USERS};

use crate::ports::outbound::KeyValueStore;
use crate::service::{IndexedStore, StoreContext};
use shared_types::{Dispute, User};

/// Dispute store over `ctx`.
pub fn disputes<KV: KeyValueStore>(ctx: StoreContext<KV>) -> IndexedStore<Dispute, KV> {
    IndexedStore::new(ctx, DISPUTES)
}

/// User store over `ctx`.
pub fn users<KV: KeyValueStore>(ctx: StoreContext<KV>) -> IndexedStore<User, KV> {
    IndexedStore::new(ctx, USERS)
}
