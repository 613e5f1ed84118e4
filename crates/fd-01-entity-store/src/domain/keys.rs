//! # Key Layout
//!
//! Every store key is derived here so no other module formats keys by hand.

/// Store key builder.
pub struct KeyLayout;

impl KeyLayout {
    /// Reserved prefix for seed markers.
    pub const SEED_PREFIX: &'static str = "__seed__";

    /// Record key: `{entity}:{id}`.
    pub fn record(entity_name: &str, id: &str) -> String {
        format!("{entity_name}:{id}")
    }

    /// Index key: the index name itself.
    pub fn index(index_name: &str) -> String {
        index_name.to_string()
    }

    /// Seed marker key: `__seed__:{entity}`.
    pub fn seed_marker(entity_name: &str) -> String {
        format!("{}:{entity_name}", Self::SEED_PREFIX)
    }
}
