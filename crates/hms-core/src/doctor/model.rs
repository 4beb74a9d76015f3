//! Doctor domain models.

use hms_store::doctors::DoctorRow;
use serde::{Deserialize, Serialize};

use crate::error::HmsResult;
pub use crate::labels::Department;
use crate::labels::labeled_enum;

/// Availability given to newly added doctors until their roster is set.
pub const DEFAULT_AVAILABILITY: &[&str] = &["Monday 9-12", "Wednesday 14-17"];

labeled_enum! {
    /// Whether a doctor is taking patients.
    DoctorStatus, "doctor status" {
        Active => "Active",
        Inactive => "Inactive",
        OnLeave => "On Leave",
    }
}

/// A doctor on the master list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub department: Department,
    /// e.g. "MBBS, MD"
    pub qualification: String,
    /// Years of practice.
    pub experience: u32,
    /// e.g. `["Monday 9-12", "Wednesday 14-17"]`
    pub availability: Vec<String>,
    pub languages: Vec<String>,
    pub email: String,
    pub status: DoctorStatus,
}

impl Doctor {
    /// Create a Doctor from a stored row.
    pub fn from_row(row: DoctorRow) -> HmsResult<Self> {
        Ok(Self {
            department: Department::from_stored(&row.department)?,
            status: DoctorStatus::from_stored(&row.status)?,
            id: row.id,
            name: row.name,
            qualification: row.qualification,
            experience: row.experience,
            availability: row.availability,
            languages: row.languages,
            email: row.email,
        })
    }
}

/// Input for adding a doctor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub department: Department,
    pub qualification: String,
    #[serde(default = "default_experience")]
    pub experience: u32,
    /// Comma-separated, e.g. "English, Hindi".
    pub languages: String,
    pub email: String,
    #[serde(default)]
    pub status: Option<DoctorStatus>,
}

fn default_experience() -> u32 {
    5
}

/// Split a comma-separated language list, dropping blanks.
pub fn parse_languages(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
