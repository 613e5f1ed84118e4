//! # Pagination Cursor
//!
//! Opaque to clients; internally the decimal offset into the index.

use shared_types::ValidationError;
use std::fmt;

/// Position in an index at which the next page starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    /// Cursor at the start of the index.
    pub const START: Cursor = Cursor(0);

    pub fn from_offset(offset: usize) -> Self {
        Cursor(offset)
    }

    pub fn offset(self) -> usize {
        self.0
    }

    /// Decode an optional client-supplied cursor. Absent or empty means start.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Cursor::START),
            Some(s) => s
                .parse::<usize>()
                .map(Cursor)
                .map_err(|_| ValidationError::InvalidCursor(s.to_string())),
        }
    }

    /// Encode for a response's `nextCursor`.
    pub fn encode(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
