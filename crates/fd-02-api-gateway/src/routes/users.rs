//! `/api/users` handlers.

use super::{AppState, ListParams};
use crate::domain::error::ApiResult;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use fd_01_entity_store::EntityStoreApi;
use shared_types::{ApiResponse, Page, User};

/// `GET /api/users?cursor&limit`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Page<User>>>> {
    let Query(params) = params?;
    let cursor = params.cursor()?;
    let limit = params.page_size(&state.limits)?;
    state.users.ensure_seed()?;
    let page = state.users.list_page(cursor, limit)?;
    Ok(Json(ApiResponse::ok(page)))
}
