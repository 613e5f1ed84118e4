//! # FMV Dispute Desk Test Suite
//!
//! Cross-crate tests that exercise the entity store, the gateway and the
//! node runtime together.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs      # entity store over a file-backed store, across reopen
//! │   └── http.rs       # gateway + node container over a file store
//! └── benches/
//!     └── entity_store_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fd-tests
//! cargo bench -p fd-tests
//! ```

pub mod integration;
