//! Billing models.

use chrono::NaiveDate;
use hms_store::bills::BillRow;
use serde::{Deserialize, Serialize};

use crate::doctor::model::Doctor;
use crate::error::HmsResult;
use crate::labels::labeled_enum;
use crate::patient::model::Patient;
use crate::validation;

labeled_enum! {
    /// Settlement state of a bill.
    BillingStatus, "billing status" {
        Paid => "Paid",
        Pending => "Pending",
        Overdue => "Overdue",
    }
}

/// A bill raised against a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub id: String,
    pub patient_id: String,
    pub appointment_id: String,
    pub doctor_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: BillingStatus,
    pub service_type: String,
}

impl Billing {
    /// Create a Billing from a stored row.
    pub fn from_row(row: BillRow) -> HmsResult<Self> {
        Ok(Self {
            date: validation::stored_date(&row.date)?,
            status: BillingStatus::from_stored(&row.status)?,
            id: row.id,
            patient_id: row.patient_id,
            appointment_id: row.appointment_id,
            doctor_id: row.doctor_id,
            amount: row.amount,
            service_type: row.service_type,
        })
    }
}

/// Input for raising a bill.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub patient_id: String,
    #[serde(default)]
    pub appointment_id: String,
    pub doctor_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: Option<BillingStatus>,
    pub service_type: String,
}

/// A bill with the parties it names, ready to print.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub bill: Billing,
    pub patient: Patient,
    pub doctor: Doctor,
}
