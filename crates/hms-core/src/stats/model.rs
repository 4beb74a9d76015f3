//! Report shapes for dashboards.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::appointment::model::Appointment;
use crate::doctor::model::Doctor;

/// An appointment with its doctor's display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor_name: String,
}

/// Hospital-wide overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub patient_count: usize,
    /// Patients per status label. Every status is present.
    pub patient_status: BTreeMap<String, usize>,
    pub doctor_count: usize,
    pub recent_appointments: Vec<AppointmentSummary>,
}

/// Activity on a single day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Distinct patient names with an appointment that day.
    pub patients_seen: usize,
    pub appointment_count: usize,
    /// Sum of Paid bills dated that day.
    pub revenue: f64,
    /// Appointments per doctor name.
    pub appointments_by_doctor: BTreeMap<String, usize>,
}

/// One doctor's view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDashboard {
    pub doctor: Doctor,
    pub upcoming_appointments: Vec<Appointment>,
    pub patient_count: usize,
}
