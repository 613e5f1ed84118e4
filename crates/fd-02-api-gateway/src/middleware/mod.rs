//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Cors → Tracing → Timeout → BodyLimit → Handler

pub mod cors;
pub mod timeout;
pub mod tracing;

pub use cors::create_cors_layer;
pub use timeout::TimeoutLayer;
pub use self::tracing::{TracingLayer, REQUEST_ID_HEADER};
