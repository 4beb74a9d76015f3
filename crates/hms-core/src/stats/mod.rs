//! Dashboard statistics.
//!
//! The pure functions take already-loaded entities so they can be tested
//! without a store; the async wrappers load what they need.

pub mod model;

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use hms_store::StorePool;

use crate::appointment::{self, model::Appointment};
use crate::billing::{self, model::{Billing, BillingStatus}};
use crate::doctor::{self, model::Doctor};
use crate::error::HmsResult;
use crate::patient::{self, model::{Patient, PatientStatus}};
use model::{AppointmentSummary, DailyStats, DashboardSummary, DoctorDashboard};

/// Appointments shown on the dashboard.
pub const RECENT_APPOINTMENTS: usize = 5;

pub fn summarize(
    patients: &[Patient],
    doctors: &[Doctor],
    appointments: &[Appointment],
    bills: &[Billing],
) -> DashboardSummary {
    let mut patient_status: BTreeMap<String, usize> = PatientStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    for p in patients {
        *patient_status.entry(p.status.as_str().to_string()).or_default() += 1;
    }

    let recent_appointments = appointments
        .iter()
        .take(RECENT_APPOINTMENTS)
        .map(|a| AppointmentSummary {
            doctor_name: doctor::name_or(doctors, &a.doctor_id, "Unassigned"),
            appointment: a.clone(),
        })
        .collect();

    DashboardSummary {
        total_revenue: billing::total_revenue(bills),
        patient_count: patients.len(),
        patient_status,
        doctor_count: doctors.len(),
        recent_appointments,
    }
}

pub fn daily(date: NaiveDate, doctors: &[Doctor], appointments: &[Appointment], bills: &[Billing]) -> DailyStats {
    let todays: Vec<&Appointment> = appointments.iter().filter(|a| a.date == date).collect();

    let patients_seen = todays
        .iter()
        .map(|a| a.patient_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut appointments_by_doctor = BTreeMap::new();
    for a in &todays {
        *appointments_by_doctor
            .entry(doctor::name_or(doctors, &a.doctor_id, "Unknown"))
            .or_insert(0) += 1;
    }

    let revenue = bills
        .iter()
        .filter(|b| b.date == date && b.status == BillingStatus::Paid)
        .map(|b| b.amount)
        .sum();

    DailyStats {
        date,
        patients_seen,
        appointment_count: todays.len(),
        revenue,
        appointments_by_doctor,
    }
}

/// Hospital-wide overview.
pub async fn dashboard_summary(pool: &StorePool) -> HmsResult<DashboardSummary> {
    let patients = patient::list_patients(pool).await?;
    let doctors = doctor::list_doctors(pool).await?;
    let appointments = appointment::list_appointments(pool).await?;
    let bills = billing::list_bills(pool, None).await?;
    Ok(summarize(&patients, &doctors, &appointments, &bills))
}

pub async fn daily_stats(pool: &StorePool, date: NaiveDate) -> HmsResult<DailyStats> {
    let doctors = doctor::list_doctors(pool).await?;
    let appointments = appointment::list_appointments(pool).await?;
    let bills = billing::list_bills(pool, Some(BillingStatus::Paid)).await?;
    Ok(daily(date, &doctors, &appointments, &bills))
}

pub async fn doctor_dashboard(pool: &StorePool, doctor_id: &str, today: NaiveDate) -> HmsResult<DoctorDashboard> {
    let doctor = doctor::get_doctor(pool, doctor_id).await?;
    let upcoming_appointments = appointment::upcoming_for_doctor(pool, &doctor.id, today).await?;
    let patient_count = patient::list_patients_for_doctor(pool, &doctor.id).await?.len();
    Ok(DoctorDashboard {
        doctor,
        upcoming_appointments,
        patient_count,
    })
}
