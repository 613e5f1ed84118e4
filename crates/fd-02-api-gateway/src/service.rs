//! API Gateway service - builds the router and serves it.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::{create_cors_layer, TimeoutLayer, TracingLayer};
use crate::routes::{self, disputes, health, users, AppState};
use axum::{routing::get, Router};
use fd_01_entity_store::{DynKVStore, StoreContext};
use std::future::Future;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API Gateway service over `ctx`.
    pub fn new(config: GatewayConfig, ctx: StoreContext<DynKVStore>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let state = AppState::new(ctx, config.limits.clone());
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the HTTP router with the full middleware stack.
    pub fn router(&self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new())
            .layer(TimeoutLayer::new(self.config.timeouts.request));

        Router::new()
            .route("/api/disputes", get(disputes::list).post(disputes::create))
            .route(
                "/api/disputes/:id",
                get(disputes::get)
                    .patch(disputes::update)
                    .delete(disputes::delete),
            )
            .route("/api/disputes/:id/letter", get(disputes::letter))
            .route("/api/users", get(users::list))
            .route("/health", get(health::check))
            .fallback(routes::not_found)
            .layer(RequestBodyLimitLayer::new(self.config.limits.max_request_size))
            .layer(middleware)
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let local = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %local, "[fd-02] HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("[fd-02] HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
