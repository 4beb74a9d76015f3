//! Outpatient department registration.

pub mod model;

use hms_store::opd as queries;
use hms_store::opd::OpdRow;
use hms_store::StorePool;
use tracing::info;

use crate::doctor;
use crate::error::{HmsError, HmsResult};
use crate::validation;
use model::{OpdForm, OpdRegistration};

/// OPD numbers are zero-padded to this many digits.
const OPD_NUMBER_WIDTH: usize = 3;

/// Format an OPD number from its sequence value.
pub fn format_opd_id(seq: u64) -> String {
    format!("opd-{:0width$}", seq, width = OPD_NUMBER_WIDTH)
}

/// Register a patient for today's OPD.
pub async fn register_opd(pool: &StorePool, form: OpdForm) -> HmsResult<OpdRegistration> {
    let patient_name = validation::required("Patient name", &form.patient_name)?;
    let contact = validation::contact(&form.contact)?;
    let time = validation::time_of_day(&form.time)?;
    let reason = validation::required("Reason for visit", &form.reason)?;
    let fees = validation::non_negative("Fees", form.fees)?;
    let doctor = doctor::get_doctor(pool, form.doctor_id.trim()).await?;

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = OpdRow {
        id: format_opd_id(seq),
        seq,
        date: validation::format_date(validation::today()),
        time,
        patient_name,
        age: form.age,
        gender: form.gender.as_str().to_string(),
        contact,
        department: form.department.as_str().to_string(),
        doctor_id: doctor.id,
        reason,
        visit_type: form.visit_type.as_str().to_string(),
        fees,
        payment_status: form.payment_status.as_str().to_string(),
        ..Default::default()
    };

    let row = queries::insert_registration(pool, row).await?;
    info!(opd_id = %row.id, department = %row.department, "Registered OPD visit");
    OpdRegistration::from_row(row)
}

/// Get a registration by OPD number (case-insensitive).
pub async fn get_registration(pool: &StorePool, id: &str) -> HmsResult<OpdRegistration> {
    let key = id.trim().to_lowercase();
    let row = queries::get_registration(pool, &key)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::RegistrationNotFound))?;
    OpdRegistration::from_row(row)
}

/// All registrations, newest first.
pub async fn list_registrations(pool: &StorePool) -> HmsResult<Vec<OpdRegistration>> {
    let rows = queries::list_registrations(pool).await?;
    rows.into_iter().rev().map(OpdRegistration::from_row).collect()
}
