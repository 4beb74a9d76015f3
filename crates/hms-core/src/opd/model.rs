//! OPD registration models.

use chrono::NaiveDate;
use hms_store::opd::OpdRow;
use serde::{Deserialize, Serialize};

use crate::error::HmsResult;
pub use crate::labels::{Department, Gender};
use crate::labels::labeled_enum;
use crate::validation;

labeled_enum! {
    /// Reason category of an outpatient visit.
    VisitType, "visit type" {
        New => "New",
        FollowUp => "Follow-up",
        Referral => "Referral",
    }
}

labeled_enum! {
    /// OPD fees are either settled at the desk or not.
    OpdPaymentStatus, "payment status" {
        Paid => "Paid",
        Pending => "Pending",
    }
}

/// An outpatient visit. The ID doubles as the OPD number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpdRegistration {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub patient_name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub department: Department,
    pub doctor_id: String,
    pub reason: String,
    pub visit_type: VisitType,
    pub fees: f64,
    pub payment_status: OpdPaymentStatus,
}

impl OpdRegistration {
    /// Create a registration from a stored row.
    pub fn from_row(row: OpdRow) -> HmsResult<Self> {
        Ok(Self {
            date: validation::stored_date(&row.date)?,
            gender: Gender::from_stored(&row.gender)?,
            department: Department::from_stored(&row.department)?,
            visit_type: VisitType::from_stored(&row.visit_type)?,
            payment_status: OpdPaymentStatus::from_stored(&row.payment_status)?,
            id: row.id,
            time: row.time,
            patient_name: row.patient_name,
            age: row.age,
            contact: row.contact,
            doctor_id: row.doctor_id,
            reason: row.reason,
            fees: row.fees,
        })
    }

    /// OPD number as printed on the slip.
    pub fn opd_number(&self) -> String {
        self.id.to_uppercase()
    }
}

/// OPD desk registration form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpdForm {
    pub patient_name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub time: String,
    pub department: Department,
    pub doctor_id: String,
    pub reason: String,
    #[serde(default = "default_visit_type")]
    pub visit_type: VisitType,
    #[serde(default = "default_fees")]
    pub fees: f64,
    #[serde(default = "default_payment_status")]
    pub payment_status: OpdPaymentStatus,
}

pub fn default_visit_type() -> VisitType {
    VisitType::New
}

pub fn default_fees() -> f64 {
    1000.0
}

pub fn default_payment_status() -> OpdPaymentStatus {
    OpdPaymentStatus::Pending
}
