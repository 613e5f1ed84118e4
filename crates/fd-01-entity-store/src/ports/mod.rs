//! # Ports Layer
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving port (operations exposed to route handlers)
//! - `outbound.rs` - Driven ports (key-value store and clock)

pub mod inbound;
pub mod outbound;
