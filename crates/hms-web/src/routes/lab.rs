//! Laboratory route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hms_core::lab::{
    self,
    model::{LabAppointment, LabStatus, LabStatusCounts, NewLabAppointment},
    report::{LabReport, LabTestRequest},
};
use hms_core::HmsError;
use hms_store::HmsEvent;
use serde::Deserialize;

use super::{api_error, ApiError, StatusRequest};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub test_name: String,
}

fn notify(state: &AppState, lab: &LabAppointment) {
    state.broadcast(HmsEvent::LabAppointmentUpdated {
        lab_id: lab.id.clone(),
        status: lab.status.to_string(),
    });
}

pub async fn list_lab_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<LabAppointment>>, ApiError> {
    let labs = lab::list_lab_appointments(&state.db).await.map_err(api_error)?;
    Ok(Json(labs))
}

pub async fn status_counts(
    State(state): State<AppState>,
) -> Result<Json<LabStatusCounts>, ApiError> {
    let counts = lab::lab_status_counts(&state.db).await.map_err(api_error)?;
    Ok(Json(counts))
}

pub async fn get_lab_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LabAppointment>, ApiError> {
    let lab = lab::get_lab_appointment(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(lab))
}

pub async fn schedule_lab_test(
    State(state): State<AppState>,
    Json(req): Json<NewLabAppointment>,
) -> Result<(StatusCode, Json<LabAppointment>), ApiError> {
    let lab = lab::schedule_lab_test(&state.db, req).await.map_err(api_error)?;
    notify(&state, &lab);
    Ok((StatusCode::CREATED, Json(lab)))
}

pub async fn update_lab_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<LabAppointment>, ApiError> {
    let status = LabStatus::parse_input(&req.status).map_err(api_error)?;
    let lab = lab::update_lab_status(&state.db, &id, status).await.map_err(api_error)?;
    notify(&state, &lab);
    Ok(Json(lab))
}

/// Draft a report for editing, generating one when none is stored yet.
pub async fn draft_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LabReport>, ApiError> {
    let report = lab::draft_report(&state.db, &id, Some(state.generator.as_ref()))
        .await
        .map_err(api_error)?;
    Ok(Json(report))
}

pub async fn save_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(report): Json<LabReport>,
) -> Result<Json<LabAppointment>, ApiError> {
    let lab = lab::save_report(&state.db, &id, &report).await.map_err(api_error)?;
    notify(&state, &lab);
    Ok(Json(lab))
}

/// Generate a report for a test name without touching any appointment.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<LabReport>, ApiError> {
    let request = LabTestRequest::new(&req.test_name).map_err(api_error)?;
    let report = state
        .generator
        .generate_lab_report(&request)
        .await
        .map_err(|e| api_error(HmsError::from(e)))?;
    Ok(Json(report))
}
