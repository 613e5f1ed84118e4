//! `/api/disputes` handlers.

use super::{AppState, ListParams};
use crate::domain::error::{ApiError, ApiResult};
use crate::letter::render_letter;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use fd_01_entity_store::EntityStoreApi;
use serde::Serialize;
use shared_types::{ApiResponse, Dispute, DisputePatch, Page, ValidationError};
use tracing::info;
use uuid::Uuid;

/// Body of a successful DELETE.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// `GET /api/disputes?cursor&limit`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Page<Dispute>>>> {
    let Query(params) = params?;
    let cursor = params.cursor()?;
    let limit = params.page_size(&state.limits)?;
    state.disputes.ensure_seed()?;
    let page = state.disputes.list_page(cursor, limit)?;
    Ok(Json(ApiResponse::ok(page)))
}

/// `GET /api/disputes/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Dispute>>> {
    require_existing(&state, &id)?;
    let dispute = state.disputes.get(&id)?;
    Ok(Json(ApiResponse::ok(dispute)))
}

/// `POST /api/disputes`
///
/// Assigns an id and `createdAt` when the client leaves them out. Variance
/// is always recomputed by the store.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Dispute>>> {
    let mut dispute: Dispute = serde_json::from_slice(&body)?;
    validate_new(&dispute)?;

    if dispute.id.trim().is_empty() {
        dispute.id = Uuid::new_v4().to_string();
    }
    if dispute.created_at == 0 {
        dispute.created_at = state.disputes.now_millis();
    }

    let stored = state.disputes.create(dispute)?;
    info!(id = %stored.id, "[fd-02] dispute created");
    Ok(Json(ApiResponse::ok(stored)))
}

/// `PATCH /api/disputes/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Dispute>>> {
    let patch: DisputePatch = serde_json::from_slice(&body)?;
    validate_patch(&patch)?;
    require_existing(&state, &id)?;

    let updated = state.disputes.mutate(&id, |current| patch.apply(current))?;
    info!(id = %updated.id, "[fd-02] dispute updated");
    Ok(Json(ApiResponse::ok(updated)))
}

/// `DELETE /api/disputes/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Deleted>>> {
    let deleted = state.disputes.delete(&id)?;
    if deleted {
        info!(id = %id, "[fd-02] dispute deleted");
    }
    Ok(Json(ApiResponse::ok(Deleted { deleted })))
}

/// `GET /api/disputes/:id/letter`
pub async fn letter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    require_existing(&state, &id)?;
    let dispute = state.disputes.get(&id)?;
    let body = render_letter(&dispute, state.disputes.now_millis());
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

fn require_existing(state: &AppState, id: &str) -> ApiResult<()> {
    if state.disputes.exists(id)? {
        Ok(())
    } else {
        Err(ApiError::not_found("Dispute not found"))
    }
}

/// A new dispute needs a patient and a non-zero billed amount.
fn validate_new(dispute: &Dispute) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if dispute.patient_name.trim().is_empty() {
        missing.push("patientName");
    }
    if dispute.billed_amount == 0.0 {
        missing.push("billedAmount");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// A patch may not blank out the fields a new dispute requires.
fn validate_patch(patch: &DisputePatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::MalformedBody(
            "no editable fields in patch".into(),
        ));
    }
    let mut missing = Vec::new();
    if matches!(&patch.patient_name, Some(name) if name.trim().is_empty()) {
        missing.push("patientName");
    }
    if patch.billed_amount == Some(0.0) {
        missing.push("billedAmount");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
