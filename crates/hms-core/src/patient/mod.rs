//! Patient registry.

pub mod model;
pub mod record;

use hms_store::patients as queries;
use hms_store::patients::PatientRow;
use hms_store::records::{self, MedicalRecordRow};
use hms_store::StorePool;
use tracing::info;

use crate::doctor;
use crate::error::{HmsError, HmsResult};
use crate::validation;
use model::{NewPatient, Patient, PatientStatus};
use record::{MedicalRecord, NewMedicalRecord};

/// Register a new patient under an existing doctor.
pub async fn register_patient(pool: &StorePool, input: NewPatient) -> HmsResult<Patient> {
    let name = validation::required("Patient name", &input.name)?;
    let contact = validation::contact(&input.contact)?;
    let address = validation::required("Address", &input.address)?;
    let doctor = doctor::get_doctor(pool, input.doctor_id.trim()).await?;

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = PatientRow {
        id: format!("pat{}", seq),
        seq,
        name,
        age: input.age,
        gender: input.gender.as_str().to_string(),
        contact,
        address,
        status: input.status.unwrap_or(PatientStatus::Admitted).as_str().to_string(),
        doctor_id: doctor.id,
        ..Default::default()
    };

    let row = queries::insert_patient(pool, row).await?;
    info!(patient_id = %row.id, "Registered patient");
    Patient::from_row(row)
}

/// Get a patient by ID.
pub async fn get_patient(pool: &StorePool, id: &str) -> HmsResult<Patient> {
    let row = queries::get_patient(pool, id)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::PatientNotFound))?;
    Patient::from_row(row)
}

/// List all patients in registration order.
pub async fn list_patients(pool: &StorePool) -> HmsResult<Vec<Patient>> {
    let rows = queries::list_patients(pool).await?;
    rows.into_iter().map(Patient::from_row).collect()
}

/// Patients whose name contains `query`, ignoring case.
pub async fn search_patients(pool: &StorePool, query: &str) -> HmsResult<Vec<Patient>> {
    let needle = query.trim().to_lowercase();
    let patients = list_patients(pool).await?;
    Ok(patients
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect())
}

/// Patients under a doctor's care.
pub async fn list_patients_for_doctor(pool: &StorePool, doctor_id: &str) -> HmsResult<Vec<Patient>> {
    let patients = list_patients(pool).await?;
    Ok(patients.into_iter().filter(|p| p.doctor_id == doctor_id).collect())
}

/// Change a patient's status.
pub async fn update_patient_status(pool: &StorePool, id: &str, status: PatientStatus) -> HmsResult<Patient> {
    let row = queries::update_patient_status(pool, id, status.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::PatientNotFound))?;
    Patient::from_row(row)
}

/// Add a note or report to an existing patient's history, dated today.
pub async fn add_medical_record(
    pool: &StorePool,
    patient_id: &str,
    input: NewMedicalRecord,
) -> HmsResult<MedicalRecord> {
    let title = validation::required("Title", &input.title)?;
    let content = validation::required("Content", &input.content)?;
    let patient = get_patient(pool, patient_id.trim()).await?;

    let seq = hms_store::next_id(pool, records::COLLECTION).await?;
    let row = MedicalRecordRow {
        id: format!("rec{}", seq),
        seq,
        patient_id: patient.id,
        date: validation::format_date(validation::today()),
        record_type: input.record_type.as_str().to_string(),
        title,
        content,
        file_url: input
            .file_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        ..Default::default()
    };

    let row = records::insert_record(pool, row).await?;
    info!(record_id = %row.id, patient_id = %row.patient_id, "Added medical record");
    MedicalRecord::from_row(row)
}

/// A patient's medical records, newest first.
pub async fn list_medical_records(pool: &StorePool, patient_id: &str) -> HmsResult<Vec<MedicalRecord>> {
    let patient = get_patient(pool, patient_id).await?;
    let rows = records::list_records_for_patient(pool, &patient.id).await?;
    rows.into_iter().rev().map(MedicalRecord::from_row).collect()
}
