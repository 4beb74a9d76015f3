//! Doctor master list.

pub mod model;

use hms_store::doctors as queries;
use hms_store::doctors::DoctorRow;
use hms_store::StorePool;
use tracing::info;

use crate::error::{HmsError, HmsResult};
use crate::validation;
use model::{Department, Doctor, DoctorStatus, NewDoctor, DEFAULT_AVAILABILITY};

/// Add a doctor to the master list.
pub async fn add_doctor(pool: &StorePool, input: NewDoctor) -> HmsResult<Doctor> {
    let name = validation::required("Name", &input.name)?;
    let qualification = validation::required("Qualification", &input.qualification)?;
    let email = validation::email(&input.email)?;
    let languages = model::parse_languages(&input.languages);
    if languages.is_empty() {
        return Err(HmsError::validation("Languages are required"));
    }

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = DoctorRow {
        id: format!("doc{}", seq),
        seq,
        name,
        department: input.department.as_str().to_string(),
        qualification,
        experience: input.experience,
        availability: DEFAULT_AVAILABILITY.iter().map(|s| s.to_string()).collect(),
        languages,
        email,
        status: input.status.unwrap_or(DoctorStatus::Active).as_str().to_string(),
        ..Default::default()
    };

    let row = queries::insert_doctor(pool, row).await?;
    info!(doctor_id = %row.id, department = %row.department, "Added doctor");
    Doctor::from_row(row)
}

/// Get a doctor by ID.
pub async fn get_doctor(pool: &StorePool, id: &str) -> HmsResult<Doctor> {
    let row = queries::get_doctor(pool, id)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::DoctorNotFound))?;
    Doctor::from_row(row)
}

/// List all doctors.
pub async fn list_doctors(pool: &StorePool) -> HmsResult<Vec<Doctor>> {
    let rows = queries::list_doctors(pool).await?;
    rows.into_iter().map(Doctor::from_row).collect()
}

/// List doctors of one department.
pub async fn list_doctors_by_department(pool: &StorePool, department: Department) -> HmsResult<Vec<Doctor>> {
    let rows = queries::list_doctors_by_department(pool, department.as_str()).await?;
    rows.into_iter().map(Doctor::from_row).collect()
}

/// Change a doctor's status.
pub async fn update_doctor_status(pool: &StorePool, id: &str, status: DoctorStatus) -> HmsResult<Doctor> {
    let row = queries::update_doctor_status(pool, id, status.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::DoctorNotFound))?;
    Doctor::from_row(row)
}

/// Doctor name for display, `fallback` when the doctor is unknown.
pub(crate) fn name_or(doctors: &[Doctor], id: &str, fallback: &str) -> String {
    doctors
        .iter()
        .find(|d| d.id == id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| fallback.to_string())
}
