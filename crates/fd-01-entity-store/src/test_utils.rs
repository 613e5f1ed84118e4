use crate::adapters::{FixedTimeSource, InMemoryKVStore};
use crate::service::StoreContext;
use shared_types::Dispute;
use std::sync::Arc;

/// 2024-05-01T00:00:00Z
pub const TEST_NOW: u64 = 1_714_521_600_000;

pub fn make_test_context() -> StoreContext<InMemoryKVStore> {
    StoreContext::new(InMemoryKVStore::new(), Arc::new(FixedTimeSource(TEST_NOW)))
}

pub fn make_test_dispute(id: &str, billed: f64, fmv: f64) -> Dispute {
    Dispute {
        id: id.to_string(),
        patient_name: format!("Patient {id}"),
        cpt_code: "99214".to_string(),
        billed_amount: billed,
        fmv_amount: fmv,
        created_at: TEST_NOW,
        ..Default::default()
    }
}
