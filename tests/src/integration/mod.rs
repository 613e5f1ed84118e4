//! Integration flows across the workspace crates.

pub mod flows;
pub mod http;
