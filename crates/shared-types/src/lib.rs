//! # Shared Types Crate
//!
//! Domain records and the response envelope shared across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the JSON shape of every record is defined here.
//! - **Derived Fields Are Computed**: a Dispute's `variance` and
//!   `variance_percent` are always recomputed from the two amounts; a value
//!   supplied by a client is never authoritative.
//! - **Uniform Envelope**: every JSON response is an [`ApiResponse`].

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::{ApiResponse, Page};
pub use errors::*;
