//! # Error Types
//!
//! Validation errors shared by every layer that accepts client input.

use thiserror::Error;

/// A request or record failed validation before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are missing or empty.
    #[error("Required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A pagination cursor could not be decoded.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// A numeric query parameter could not be parsed.
    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// The request body is not a valid record.
    #[error("Malformed body: {0}")]
    MalformedBody(String),

    /// The record id is empty.
    #[error("Record id must not be empty")]
    EmptyId,
}
