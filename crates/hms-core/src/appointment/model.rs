//! Appointment domain models.

use chrono::NaiveDate;
use hms_store::appointments::AppointmentRow;
use serde::{Deserialize, Serialize};

use crate::error::HmsResult;
pub use crate::labels::Gender;
use crate::labels::labeled_enum;
use crate::validation;

labeled_enum! {
    /// Appointment lifecycle state.
    AppointmentStatus, "appointment status" {
        Confirmed => "Confirmed",
        Pending => "Pending",
        Cancelled => "Cancelled",
        Completed => "Completed",
    }
}

labeled_enum! {
    /// How the consultation takes place.
    AppointmentMode, "appointment mode" {
        InPerson => "In-person",
        Online => "Online",
        Telephonic => "Telephonic",
    }
}

labeled_enum! {
    /// Settlement of the consultation fee.
    PaymentStatus, "payment status" {
        Paid => "Paid",
        Pending => "Pending",
        PartiallyPaid => "Partially Paid",
    }
}

impl AppointmentStatus {
    /// Check if transition to another status is valid.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        match (self, to) {
            (a, b) if a == b => true,
            (Self::Pending, Self::Confirmed | Self::Cancelled | Self::Completed) => true,
            (Self::Confirmed, Self::Pending | Self::Cancelled | Self::Completed) => true,
            // Completed and Cancelled are final
            _ => false,
        }
    }
}

/// A scheduled consultation. Patient details travel with the appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub patient_contact: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub mode: AppointmentMode,
    /// Minutes.
    pub duration: u32,
    pub fees: f64,
    pub payment_status: PaymentStatus,
}

impl Appointment {
    /// Create an Appointment from a stored row.
    pub fn from_row(row: AppointmentRow) -> HmsResult<Self> {
        Ok(Self {
            patient_gender: Gender::from_stored(&row.patient_gender)?,
            date: validation::stored_date(&row.date)?,
            status: AppointmentStatus::from_stored(&row.status)?,
            mode: AppointmentMode::from_stored(&row.mode)?,
            payment_status: PaymentStatus::from_stored(&row.payment_status)?,
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            patient_age: row.patient_age,
            patient_contact: row.patient_contact,
            doctor_id: row.doctor_id,
            time: row.time,
            reason: row.reason,
            duration: row.duration,
            fees: row.fees,
        })
    }

    /// Sort key: date, then time of day.
    pub fn slot_key(&self) -> (NaiveDate, u32) {
        (self.date, validation::minutes_of_day(&self.time).unwrap_or(u32::MAX))
    }
}

/// The scheduling form, used for both new and edited appointments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentForm {
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub patient_contact: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    /// e.g. "10:00 AM"
    pub time: String,
    pub reason: String,
    #[serde(default = "default_mode")]
    pub mode: AppointmentMode,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default = "default_fees")]
    pub fees: f64,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
}

pub fn default_mode() -> AppointmentMode {
    AppointmentMode::InPerson
}

pub fn default_duration() -> u32 {
    30
}

pub fn default_fees() -> f64 {
    500.0
}

pub fn default_status() -> AppointmentStatus {
    AppointmentStatus::Confirmed
}

pub fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Pending
}

/// List filter. Unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    /// Case-insensitive patient name fragment.
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if self.date.is_some_and(|d| d != appointment.date) {
            return false;
        }
        if self.status.is_some_and(|s| s != appointment.status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => appointment
                .patient_name
                .to_lowercase()
                .contains(&q.to_lowercase()),
            _ => true,
        }
    }
}
