//! Patient route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hms_core::patient::{
    self,
    model::{NewPatient, Patient, PatientStatus},
    record::{MedicalRecord, NewMedicalRecord},
};
use hms_store::HmsEvent;
use serde::Deserialize;

use super::{api_error, ApiError, StatusRequest};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientQuery {
    pub search: Option<String>,
    pub doctor_id: Option<String>,
}

pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = match (query.search, query.doctor_id) {
        (Some(search), _) => patient::search_patients(&state.db, &search).await,
        (None, Some(doctor_id)) => patient::list_patients_for_doctor(&state.db, &doctor_id).await,
        (None, None) => patient::list_patients(&state.db).await,
    }
    .map_err(api_error)?;

    Ok(Json(patients))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let patient = patient::get_patient(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(patient))
}

pub async fn register_patient(
    State(state): State<AppState>,
    Json(req): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = patient::register_patient(&state.db, req).await.map_err(api_error)?;

    state.broadcast(HmsEvent::PatientUpdated {
        patient_id: patient.id.clone(),
        status: patient.status.to_string(),
    });

    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn update_patient_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Patient>, ApiError> {
    let status = PatientStatus::parse_input(&req.status).map_err(api_error)?;
    let patient = patient::update_patient_status(&state.db, &id, status)
        .await
        .map_err(api_error)?;

    state.broadcast(HmsEvent::PatientUpdated {
        patient_id: patient.id.clone(),
        status: patient.status.to_string(),
    });

    Ok(Json(patient))
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MedicalRecord>>, ApiError> {
    let records = patient::list_medical_records(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(records))
}

pub async fn add_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewMedicalRecord>,
) -> Result<(StatusCode, Json<MedicalRecord>), ApiError> {
    let record = patient::add_medical_record(&state.db, &id, req).await.map_err(api_error)?;

    state.broadcast(HmsEvent::MedicalRecordAdded {
        record_id: record.id.clone(),
        patient_id: record.patient_id.clone(),
    });

    Ok((StatusCode::CREATED, Json(record)))
}
