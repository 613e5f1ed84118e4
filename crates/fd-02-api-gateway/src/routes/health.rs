//! Liveness endpoint.

use axum::{response::IntoResponse, Json};

/// `GET /health`
pub async fn check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "api-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
