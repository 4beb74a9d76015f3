//! Pharmacy: prescriptions and dispensing.

pub mod model;

use std::collections::BTreeMap;

use hms_store::prescriptions as queries;
use hms_store::prescriptions::PrescriptionRow;
use hms_store::StorePool;
use tracing::info;

use crate::error::{HmsError, HmsResult};
use crate::patient;
use crate::validation;
use model::{NewPrescription, Prescription, PrescriptionStatus};

/// Write a prescription for an existing patient.
pub async fn create_prescription(pool: &StorePool, input: NewPrescription) -> HmsResult<Prescription> {
    let medication = validation::required("Medication", &input.medication)?;
    let dosage = validation::required("Dosage", &input.dosage)?;
    let patient = patient::get_patient(pool, input.patient_id.trim()).await?;

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = PrescriptionRow {
        id: format!("rx{}", seq),
        seq,
        patient_id: patient.id,
        medication,
        dosage,
        status: PrescriptionStatus::Pending.as_str().to_string(),
        ..Default::default()
    };

    let row = queries::insert_prescription(pool, row).await?;
    info!(prescription_id = %row.id, "Created prescription");
    Prescription::from_row(row)
}

pub async fn get_prescription(pool: &StorePool, id: &str) -> HmsResult<Prescription> {
    let row = queries::get_prescription(pool, id)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::PrescriptionNotFound))?;
    Prescription::from_row(row)
}

pub async fn list_prescriptions(pool: &StorePool) -> HmsResult<Vec<Prescription>> {
    let rows = queries::list_prescriptions(pool).await?;
    rows.into_iter().map(Prescription::from_row).collect()
}

pub async fn fill_prescription(pool: &StorePool, id: &str) -> HmsResult<Prescription> {
    transition(pool, id, PrescriptionStatus::Filled).await
}

pub async fn cancel_prescription(pool: &StorePool, id: &str) -> HmsResult<Prescription> {
    transition(pool, id, PrescriptionStatus::Cancelled).await
}

/// Put a filled prescription back in the dispensing queue.
pub async fn reopen_prescription(pool: &StorePool, id: &str) -> HmsResult<Prescription> {
    transition(pool, id, PrescriptionStatus::Pending).await
}

pub async fn prescription_status_counts(pool: &StorePool) -> HmsResult<BTreeMap<String, usize>> {
    let all = list_prescriptions(pool).await?;
    Ok(model::status_counts(&all))
}

async fn transition(pool: &StorePool, id: &str, to: PrescriptionStatus) -> HmsResult<Prescription> {
    let current = get_prescription(pool, id).await?;
    if !current.status.can_transition_to(&to) {
        return Err(HmsError::InvalidStateTransition {
            from: current.status.to_string(),
            to: to.to_string(),
        });
    }

    let row = queries::update_prescription_status(pool, id, to.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::PrescriptionNotFound))?;
    info!(prescription_id = %id, status = %to, "Prescription status changed");
    Prescription::from_row(row)
}
