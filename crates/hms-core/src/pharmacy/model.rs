//! Prescription models.

use std::collections::BTreeMap;

use hms_store::prescriptions::PrescriptionRow;
use serde::{Deserialize, Serialize};

use crate::error::HmsResult;
use crate::labels::labeled_enum;

labeled_enum! {
    /// Dispensing state of a prescription.
    PrescriptionStatus, "prescription status" {
        Pending => "Pending",
        Filled => "Filled",
        Cancelled => "Cancelled",
    }
}

impl PrescriptionStatus {
    /// Pending prescriptions are filled or cancelled. A fill can be undone;
    /// a cancellation cannot.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        use PrescriptionStatus::*;
        matches!((self, to), (Pending, Filled) | (Pending, Cancelled) | (Filled, Pending))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub medication: String,
    pub dosage: String,
    pub status: PrescriptionStatus,
}

impl Prescription {
    pub fn from_row(row: PrescriptionRow) -> HmsResult<Self> {
        Ok(Self {
            status: PrescriptionStatus::from_stored(&row.status)?,
            id: row.id,
            patient_id: row.patient_id,
            medication: row.medication,
            dosage: row.dosage,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    pub patient_id: String,
    pub medication: String,
    pub dosage: String,
}

/// Count per status, keyed by label. Every status is present.
pub fn status_counts(prescriptions: &[Prescription]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = PrescriptionStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    for p in prescriptions {
        *counts.entry(p.status.as_str().to_string()).or_default() += 1;
    }
    counts
}
