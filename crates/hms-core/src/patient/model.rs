//! Patient domain models.

use hms_store::patients::PatientRow;
use serde::{Deserialize, Serialize};

use crate::error::HmsResult;
pub use crate::labels::Gender;
use crate::labels::labeled_enum;

labeled_enum! {
    /// Where a patient currently is in their stay.
    PatientStatus, "patient status" {
        Admitted => "Admitted",
        UnderObservation => "Under Observation",
        Discharged => "Discharged",
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub address: String,
    pub status: PatientStatus,
    pub doctor_id: String,
}

impl Patient {
    /// Create a Patient from a stored row.
    pub fn from_row(row: PatientRow) -> HmsResult<Self> {
        Ok(Self {
            gender: Gender::from_stored(&row.gender)?,
            status: PatientStatus::from_stored(&row.status)?,
            id: row.id,
            name: row.name,
            age: row.age,
            contact: row.contact,
            address: row.address,
            doctor_id: row.doctor_id,
        })
    }
}

/// Input for registering a patient.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub address: String,
    #[serde(default)]
    pub status: Option<PatientStatus>,
    pub doctor_id: String,
}
