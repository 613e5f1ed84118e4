//! REST route handlers.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/api/disputes` | [`disputes::list`] |
//! | POST | `/api/disputes` | [`disputes::create`] |
//! | GET | `/api/disputes/:id` | [`disputes::get`] |
//! | PATCH | `/api/disputes/:id` | [`disputes::update`] |
//! | DELETE | `/api/disputes/:id` | [`disputes::delete`] |
//! | GET | `/api/disputes/:id/letter` | [`disputes::letter`] |
//! | GET | `/api/users` | [`users::list`] |
//! | GET | `/health` | [`health::check`] |

pub mod disputes;
pub mod health;
pub mod users;

use crate::domain::config::LimitsConfig;
use crate::domain::error::ApiError;
use fd_01_entity_store::{Cursor, DynKVStore, IndexedStore, StoreContext};
use serde::Deserialize;
use shared_types::{Dispute, User, ValidationError};
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub disputes: IndexedStore<Dispute, DynKVStore>,
    pub users: IndexedStore<User, DynKVStore>,
    pub limits: Arc<LimitsConfig>,
}

impl AppState {
    pub fn new(ctx: StoreContext<DynKVStore>, limits: LimitsConfig) -> Self {
        Self {
            disputes: fd_01_entity_store::entities::disputes(ctx.clone()),
            users: fd_01_entity_store::entities::users(ctx),
            limits: Arc::new(limits),
        }
    }
}

/// `?cursor=&limit=` on list endpoints.
///
/// Both are taken as raw strings so a bad value becomes a 400 with the
/// error envelope rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Page size clamped to `[1, max_page_size]`. Negative values clamp to 1.
    pub fn page_size(&self, limits: &LimitsConfig) -> Result<usize, ValidationError> {
        let requested = match self.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let n: i64 = raw.parse().map_err(|_| ValidationError::InvalidParameter {
                    name: "limit",
                    value: raw.to_string(),
                })?;
                Some(usize::try_from(n.max(0)).unwrap_or(usize::MAX))
            }
        };
        Ok(limits.page_size(requested))
    }

    /// Decoded cursor; absent or empty means the start of the index.
    pub fn cursor(&self) -> Result<Cursor, ValidationError> {
        Cursor::parse(self.cursor.as_deref())
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
