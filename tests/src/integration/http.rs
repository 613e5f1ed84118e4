//! # HTTP Flows
//!
//! The gateway router built by the node container over a file-backed data
//! directory: what one container writes, the next one reads.

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use node_runtime::{NodeConfig, ServiceContainer, StorageBackend, StorageConfig};
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn file_config(dir: &Path) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.storage = StorageConfig {
            backend: StorageBackend::File,
            data_dir: dir.to_path_buf(),
            sync_writes: false,
        };
        config
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn call_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = call(app, method, uri, body).await;
        (status, serde_json::from_str(&text).unwrap())
    }

    #[tokio::test]
    async fn test_created_dispute_survives_restart() {
        let dir = TempDir::new().unwrap();

        let id = {
            let container = ServiceContainer::new(file_config(dir.path())).unwrap();
            let app = container.gateway().unwrap().router();

            let (status, created) = call_json(
                app,
                "POST",
                "/api/disputes",
                Some(json!({
                    "patientName": "Sam Lee",
                    "billedAmount": 980.0,
                    "fmvAmount": 490.0,
                    "providerName": "Lakeside Clinic",
                    "dateOfService": "2024-04-02"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(created["data"]["variance"], 490.0);
            assert_eq!(created["data"]["variancePercent"], 100.0);
            created["data"]["id"].as_str().unwrap().to_string()
        };

        let container = ServiceContainer::new(file_config(dir.path())).unwrap();
        let app = container.gateway().unwrap().router();

        let (status, fetched) = call_json(app.clone(), "GET", &format!("/api/disputes/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["patientName"], "Sam Lee");

        let (status, letter) = call(app, "GET", &format!("/api/disputes/{id}/letter"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(letter.contains("Sam Lee"));
        assert!(letter.contains("Lakeside Clinic"));
        assert!(letter.contains("April 2, 2024"));
        assert!(letter.contains("$490.00"));
    }

    #[tokio::test]
    async fn test_deleted_seed_stays_deleted_after_restart() {
        let dir = TempDir::new().unwrap();

        {
            let container = ServiceContainer::new(file_config(dir.path())).unwrap();
            let app = container.gateway().unwrap().router();
            let (_, page) = call_json(app.clone(), "GET", "/api/disputes", None).await;
            assert_eq!(page["data"]["items"].as_array().unwrap().len(), 2);

            let (status, deleted) = call_json(app, "DELETE", "/api/disputes/disp_1", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(deleted["data"]["deleted"], true);
        }

        let container = ServiceContainer::new(file_config(dir.path())).unwrap();
        let app = container.gateway().unwrap().router();

        let (_, page) = call_json(app.clone(), "GET", "/api/disputes", None).await;
        let items = page["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "disp_2");

        let (status, body) = call_json(app, "GET", "/api/disputes/disp_1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_patch_then_list_reflects_update() {
        let dir = TempDir::new().unwrap();
        let container = ServiceContainer::new(file_config(dir.path())).unwrap();
        let app = container.gateway().unwrap().router();

        call(app.clone(), "GET", "/api/disputes", None).await;
        let (status, patched) = call_json(
            app.clone(),
            "PATCH",
            "/api/disputes/disp_1",
            Some(json!({ "fmvAmount": 225.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["data"]["variance"], 225.0);
        assert_eq!(patched["data"]["variancePercent"], 100.0);

        let (_, page) = call_json(app, "GET", "/api/disputes?limit=1", None).await;
        assert_eq!(page["data"]["items"][0]["fmvAmount"], 225.0);
        assert_eq!(page["data"]["nextCursor"], "1");
    }

    #[tokio::test]
    async fn test_users_and_disputes_seed_independently() {
        let dir = TempDir::new().unwrap();
        let container = ServiceContainer::new(file_config(dir.path())).unwrap();
        let app = container.gateway().unwrap().router();

        let (_, users) = call_json(app.clone(), "GET", "/api/users", None).await;
        assert_eq!(users["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(container.entity_counts().unwrap(), (0, 2));

        call(app, "GET", "/api/disputes", None).await;
        assert_eq!(container.entity_counts().unwrap(), (2, 2));
    }
}
