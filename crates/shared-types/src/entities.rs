//! # Core Domain Entities
//!
//! Records persisted by the entity store and served by the API gateway.
//!
//! ## Records
//!
//! - **Dispute**: a medical-billing variance case (billed vs. fair market value)
//! - **User**: an operator account from the default seed set

use serde::{Deserialize, Serialize};

/// Epoch milliseconds.
pub type TimestampMillis = u64;

// =============================================================================
// VARIANCE
// =============================================================================

/// Derived variance between a billed amount and its FMV benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variance {
    /// `billed - fmv`, in dollars.
    pub amount: f64,
    /// `amount / fmv * 100`, or `0.0` when `fmv` is not positive.
    pub percent: f64,
}

/// Compute the variance of `billed` over the `fmv` benchmark.
pub fn calculate_variance(billed: f64, fmv: f64) -> Variance {
    let amount = billed - fmv;
    let percent = if fmv > 0.0 { amount / fmv * 100.0 } else { 0.0 };
    Variance { amount, percent }
}

// =============================================================================
// DISPUTE
// =============================================================================

/// A billing dispute record.
///
/// Every field defaults when absent from the JSON body so request validation
/// can report missing fields instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dispute {
    pub id: String,
    pub patient_name: String,
    /// Case reference or patient account id.
    pub patient_hash: String,
    /// Governing statute, e.g. "No Surprises Act (45 CFR § 149.410)".
    pub statute: String,
    pub cpt_code: String,
    pub billed_amount: f64,
    /// Fair Market Value benchmark.
    pub fmv_amount: f64,
    /// Derived: `billed_amount - fmv_amount`.
    pub variance: f64,
    /// Derived: see [`calculate_variance`].
    pub variance_percent: f64,
    pub provider_name: String,
    /// `YYYY-MM-DD`.
    pub date_of_service: String,
    pub created_at: TimestampMillis,
}

impl Dispute {
    /// Overwrite the derived variance fields from the two amounts.
    pub fn recompute_variance(&mut self) {
        let variance = calculate_variance(self.billed_amount, self.fmv_amount);
        self.variance = variance.amount;
        self.variance_percent = variance.percent;
    }

    /// Builder-style [`Dispute::recompute_variance`].
    pub fn with_recomputed_variance(mut self) -> Self {
        self.recompute_variance();
        self
    }
}

/// Partial update of the editable Dispute fields.
///
/// `id`, `created_at` and the derived variance fields are not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisputePatch {
    pub patient_name: Option<String>,
    pub patient_hash: Option<String>,
    pub statute: Option<String>,
    pub cpt_code: Option<String>,
    pub billed_amount: Option<f64>,
    pub fmv_amount: Option<f64>,
    pub provider_name: Option<String>,
    pub date_of_service: Option<String>,
}

impl DisputePatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch and recompute the derived fields.
    pub fn apply(self, mut dispute: Dispute) -> Dispute {
        if let Some(v) = self.patient_name {
            dispute.patient_name = v;
        }
        if let Some(v) = self.patient_hash {
            dispute.patient_hash = v;
        }
        if let Some(v) = self.statute {
            dispute.statute = v;
        }
        if let Some(v) = self.cpt_code {
            dispute.cpt_code = v;
        }
        if let Some(v) = self.billed_amount {
            dispute.billed_amount = v;
        }
        if let Some(v) = self.fmv_amount {
            dispute.fmv_amount = v;
        }
        if let Some(v) = self.provider_name {
            dispute.provider_name = v;
        }
        if let Some(v) = self.date_of_service {
            dispute.date_of_service = v;
        }
        dispute.with_recomputed_variance()
    }
}

// =============================================================================
// USER
// =============================================================================

/// An operator account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
}
