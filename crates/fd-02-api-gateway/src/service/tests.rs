//! Router tests driven through the full middleware stack.

use super::*;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use fd_01_entity_store::adapters::{FaultyKVStore, FixedTimeSource, InMemoryKVStore};
use fd_01_entity_store::{entities, EntityStoreApi};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// 2024-05-01T00:00:00Z
const TEST_NOW: u64 = 1_714_521_600_000;

fn context_over(kv: DynKVStore) -> StoreContext<DynKVStore> {
    StoreContext::new(kv, Arc::new(FixedTimeSource(TEST_NOW)))
}

fn test_service() -> (ApiGatewayService, StoreContext<DynKVStore>) {
    let ctx = context_over(Box::new(InMemoryKVStore::new()));
    let service = ApiGatewayService::new(GatewayConfig::default(), ctx.clone()).unwrap();
    (service, ctx)
}

async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, text) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let json = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, json)
}

fn ids(page: &Value) -> Vec<&str> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect()
}

// =============================================================================
// LIST
// =============================================================================

#[tokio::test]
async fn test_list_seeds_on_first_call() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/disputes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["data"]), ["disp_1", "disp_2"]);
    assert_eq!(body["data"]["nextCursor"], Value::Null);
    assert_eq!(body["data"]["items"][0]["variance"], 264.5);
}

#[tokio::test]
async fn test_list_follows_cursor() {
    let (service, _) = test_service();

    let (_, first) = send(service.router(), "GET", "/api/disputes?limit=1", None).await;
    assert_eq!(ids(&first["data"]), ["disp_1"]);
    let cursor = first["data"]["nextCursor"].as_str().unwrap().to_string();

    let uri = format!("/api/disputes?limit=1&cursor={cursor}");
    let (_, second) = send(service.router(), "GET", &uri, None).await;
    assert_eq!(ids(&second["data"]), ["disp_2"]);
    assert_eq!(second["data"]["nextCursor"], Value::Null);
}

#[tokio::test]
async fn test_list_bad_cursor_is_400() {
    let (service, ctx) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/disputes?cursor=abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid cursor"));

    // Rejected before seeding.
    let disputes = entities::disputes(ctx);
    assert!(!disputes.exists("disp_1").unwrap());
    assert!(!disputes.index().is_seeded().unwrap());
}

#[tokio::test]
async fn test_users_bad_cursor_leaves_store_untouched() {
    let (service, ctx) = test_service();

    let (status, _) = send(service.router(), "GET", "/api/users?cursor=-1", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let users = entities::users(ctx);
    assert!(!users.exists("u1").unwrap());
    assert!(!users.index().is_seeded().unwrap());
}

#[tokio::test]
async fn test_list_duplicate_query_param_uses_envelope() {
    let (service, ctx) = test_service();

    let (status, body) = send(
        service.router(),
        "GET",
        "/api/disputes?limit=1&limit=2",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
    assert!(!entities::disputes(ctx).index().is_seeded().unwrap());
}

#[tokio::test]
async fn test_list_bad_limit_is_400() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/disputes?limit=lots", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid limit: lots");
}

// =============================================================================
// GET / POST
// =============================================================================

#[tokio::test]
async fn test_get_missing_is_404() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/disputes/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Dispute not found"}));
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamp() {
    let (service, _) = test_service();

    let (status, body) = send(
        service.router(),
        "POST",
        "/api/disputes",
        Some(json!({
            "patientName": "X",
            "billedAmount": 450,
            "fmvAmount": 185.5,
            "variance": 1,
            "variancePercent": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created = &body["data"];
    let id = created["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(created["createdAt"], TEST_NOW);
    assert_eq!(created["variance"], 264.5);
    let percent = created["variancePercent"].as_f64().unwrap();
    assert!((percent - 142.58).abs() < 0.01);

    let (status, fetched) =
        send(service.router(), "GET", &format!("/api/disputes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["data"], created);
}

#[tokio::test]
async fn test_create_keeps_client_id_and_timestamp() {
    let (service, _) = test_service();

    let (_, body) = send(
        service.router(),
        "POST",
        "/api/disputes",
        Some(json!({"id": "d1", "patientName": "X", "billedAmount": 10, "createdAt": 42})),
    )
    .await;

    assert_eq!(body["data"]["id"], "d1");
    assert_eq!(body["data"]["createdAt"], 42);
}

#[tokio::test]
async fn test_create_missing_patient_is_400_without_mutation() {
    let (service, ctx) = test_service();

    let (status, body) = send(
        service.router(),
        "POST",
        "/api/disputes",
        Some(json!({"id": "d1", "billedAmount": 450})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Required fields missing: patientName");
    let store = entities::disputes(ctx);
    assert!(!store.exists("d1").unwrap());
    assert!(store.index().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_zero_amount_is_400() {
    let (service, _) = test_service();

    let (status, body) = send(
        service.router(),
        "POST",
        "/api/disputes",
        Some(json!({"patientName": "X", "billedAmount": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Required fields missing: billedAmount");
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let (service, _) = test_service();

    let (status, _, text) = send_raw(
        service.router(),
        "POST",
        "/api/disputes",
        Some("{\"patientName\": ".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Malformed body"));
}

#[tokio::test]
async fn test_create_non_utf8_body_uses_envelope() {
    let (service, ctx) = test_service();
    let request = Request::builder()
        .method("POST")
        .uri("/api/disputes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(vec![b'{', 0xff, 0xfe, b'}']))
        .unwrap();

    let response = service.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed body"));
    assert!(entities::disputes(ctx).index().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_oversized_body_is_rejected() {
    let (service, _) = test_service();
    let huge = format!(
        r#"{{"patientName":"{}","billedAmount":1}}"#,
        "x".repeat(128 * 1024)
    );

    let (status, _, _) = send_raw(service.router(), "POST", "/api/disputes", Some(huge)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

// =============================================================================
// PATCH / DELETE
// =============================================================================

#[tokio::test]
async fn test_patch_recomputes_variance() {
    let (service, _) = test_service();
    send(service.router(), "GET", "/api/disputes", None).await;

    let (status, body) = send(
        service.router(),
        "PATCH",
        "/api/disputes/disp_1",
        Some(json!({"fmvAmount": 225, "id": "hijack", "createdAt": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["id"], "disp_1");
    assert_eq!(updated["createdAt"], TEST_NOW - 2 * 86_400_000);
    assert_eq!(updated["fmvAmount"], 225.0);
    assert_eq!(updated["variance"], 225.0);
    assert_eq!(updated["variancePercent"], 100.0);
}

#[tokio::test]
async fn test_patch_missing_is_404() {
    let (service, ctx) = test_service();

    let (status, _) = send(
        service.router(),
        "PATCH",
        "/api/disputes/ghost",
        Some(json!({"cptCode": "99213"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!entities::disputes(ctx).exists("ghost").unwrap());
}

#[tokio::test]
async fn test_patch_empty_is_400() {
    let (service, _) = test_service();
    send(service.router(), "GET", "/api/disputes", None).await;

    let (status, _) = send(service.router(), "PATCH", "/api/disputes/disp_1", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_twice() {
    let (service, _) = test_service();
    send(service.router(), "GET", "/api/disputes", None).await;

    let (status, first) = send(service.router(), "DELETE", "/api/disputes/disp_2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"], json!({"deleted": true}));

    let (_, second) = send(service.router(), "DELETE", "/api/disputes/disp_2", None).await;
    assert_eq!(second["data"], json!({"deleted": false}));

    let (status, _) = send(service.router(), "GET", "/api/disputes/disp_2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, page) = send(service.router(), "GET", "/api/disputes", None).await;
    assert_eq!(ids(&page["data"]), ["disp_1"]);
}

// =============================================================================
// LETTER / USERS / HEALTH
// =============================================================================

#[tokio::test]
async fn test_letter_is_plain_text() {
    let (service, _) = test_service();
    send(service.router(), "GET", "/api/disputes", None).await;

    let (status, headers, text) =
        send_raw(service.router(), "GET", "/api/disputes/disp_1/letter", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert!(text.starts_with("May 1, 2024"));
    assert!(text.contains("Metropolitan General Hospital"));
    assert!(text.contains("rendered on March 15, 2024."));
    assert!(text.contains("($264.50)"));
    assert!(text.contains("a 142.6% increase"));
}

#[tokio::test]
async fn test_letter_missing_is_404() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/disputes/none/letter", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_users_seeded() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["items"],
        json!([{"id": "u1", "name": "User A"}, {"id": "u2", "name": "User B"}])
    );
}

#[tokio::test]
async fn test_health() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404_envelope() {
    let (service, _) = test_service();

    let (status, body) = send(service.router(), "GET", "/api/invoices", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Not Found"}));
}

// =============================================================================
// STORE FAILURES / CONFIG
// =============================================================================

#[tokio::test]
async fn test_store_failure_is_500() {
    let ctx = context_over(Box::new(FaultyKVStore::unavailable()));
    let service = ApiGatewayService::new(GatewayConfig::default(), ctx).unwrap();

    let (status, body) = send(service.router(), "GET", "/api/disputes", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "Internal server error"})
    );
}

#[tokio::test]
async fn test_corrupt_record_is_500() {
    let mut kv = FaultyKVStore::new();
    kv.plant(b"dispute:bad", b"not json");
    let service = ApiGatewayService::new(GatewayConfig::default(), context_over(Box::new(kv)))
        .unwrap();

    let (status, _) = send(service.router(), "GET", "/api/disputes/bad", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = GatewayConfig::default();
    config.limits.max_page_size = 0;

    let result = ApiGatewayService::new(config, context_over(Box::new(InMemoryKVStore::new())));

    assert!(matches!(result, Err(GatewayError::Config(_))));
}

#[tokio::test]
async fn test_configured_max_page_size() {
    let mut config = GatewayConfig::default();
    config.limits.max_page_size = 1;
    config.limits.default_page_size = 1;
    let service =
        ApiGatewayService::new(config, context_over(Box::new(InMemoryKVStore::new()))).unwrap();

    let (_, body) = send(service.router(), "GET", "/api/disputes?limit=50", None).await;

    assert_eq!(ids(&body["data"]), ["disp_1"]);
    assert_eq!(body["data"]["nextCursor"], "1");
}

#[tokio::test]
async fn test_serve_stops_on_shutdown() {
    let (service, _) = test_service();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let result = service.serve(listener, async {}).await;

    assert!(result.is_ok());
}
