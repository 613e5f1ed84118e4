use crate::domain::schema::{EntitySchema, Record};
use shared_types::{Dispute, TimestampMillis};

const DAY_MILLIS: TimestampMillis = 86_400_000;

/// Dispute schema: `dispute:{id}`, indexed under `disputes`.
pub const DISPUTES: EntitySchema<Dispute> = EntitySchema {
    entity_name: "dispute",
    index_name: "disputes",
    initial_state: Dispute::default,
    seed_data: seed_disputes,
};

impl Record for Dispute {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn normalize(self) -> Self {
        self.with_recomputed_variance()
    }
}

/// Default disputes, created one and two days before `now`.
pub fn seed_disputes(now: TimestampMillis) -> Vec<Dispute> {
    vec![
        Dispute {
            id: "disp_1".into(),
            patient_name: "Jane Doe".into(),
            patient_hash: "REF-8821-X".into(),
            statute: "No Surprises Act (45 CFR § 149.410)".into(),
            cpt_code: "99214".into(),
            billed_amount: 450.00,
            fmv_amount: 185.50,
            provider_name: "Metropolitan General Hospital".into(),
            date_of_service: "2024-03-15".into(),
            created_at: now.saturating_sub(DAY_MILLIS * 2),
            ..Default::default()
        },
        Dispute {
            id: "disp_2".into(),
            patient_name: "John Smith".into(),
            patient_hash: "ACC-4492-Z".into(),
            statute: "Texas Health & Safety Code § 146.002".into(),
            cpt_code: "70450".into(),
            billed_amount: 1200.00,
            fmv_amount: 350.00,
            provider_name: "Bayside Imaging Center".into(),
            date_of_service: "2024-04-01".into(),
            created_at: now.saturating_sub(DAY_MILLIS),
            ..Default::default()
        },
    ]
}
