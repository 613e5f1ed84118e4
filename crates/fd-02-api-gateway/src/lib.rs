//! FD-02 API Gateway - REST interface over the entity store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (fd-02)                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                 Middleware Stack                    │  │
//! │  │      Cors → Tracing → Timeout → BodyLimit           │  │
//! │  └─────────────────────────┬──────────────────────────┘  │
//! │                            │                             │
//! │  ┌─────────────────────────┴──────────────────────────┐  │
//! │  │                  Route Handlers                     │  │
//! │  │   /api/disputes  /api/users  /health  (+ letter)    │  │
//! │  └─────────────────────────┬──────────────────────────┘  │
//! └────────────────────────────┼─────────────────────────────┘
//!                              │
//!                   fd-01 IndexedStore<T, KV>
//! ```
//!
//! Every JSON response uses the `{success, data?, error?}` envelope.
//! Validation happens before the store is touched; store failures surface
//! as an opaque 500.
//!
//! # Usage
//!
//! ```ignore
//! use fd_02_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), ctx)?;
//! service.start(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod letter;
pub mod middleware;
pub mod routes;
pub mod service;

pub use domain::config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use routes::AppState;
pub use service::ApiGatewayService;
