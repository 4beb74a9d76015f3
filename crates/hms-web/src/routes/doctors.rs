//! Doctor route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hms_core::doctor::{self, model::{Department, Doctor, DoctorStatus, NewDoctor}};
use hms_core::stats::{self, model::DoctorDashboard};
use hms_core::validation;
use hms_store::HmsEvent;
use serde::Deserialize;

use super::{api_error, ApiError, StatusRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DoctorQuery {
    pub department: Option<String>,
}

pub async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<DoctorQuery>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let doctors = match query.department {
        Some(dept) => {
            let dept = Department::parse_input(&dept).map_err(api_error)?;
            doctor::list_doctors_by_department(&state.db, dept).await
        }
        None => doctor::list_doctors(&state.db).await,
    }
    .map_err(api_error)?;

    Ok(Json(doctors))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let doctor = doctor::get_doctor(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(doctor))
}

pub async fn add_doctor(
    State(state): State<AppState>,
    Json(req): Json<NewDoctor>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let doctor = doctor::add_doctor(&state.db, req).await.map_err(api_error)?;

    state.broadcast(HmsEvent::DoctorUpdated {
        doctor_id: doctor.id.clone(),
        status: doctor.status.to_string(),
    });

    Ok((StatusCode::CREATED, Json(doctor)))
}

pub async fn update_doctor_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Doctor>, ApiError> {
    let status = DoctorStatus::parse_input(&req.status).map_err(api_error)?;
    let doctor = doctor::update_doctor_status(&state.db, &id, status)
        .await
        .map_err(api_error)?;

    state.broadcast(HmsEvent::DoctorUpdated {
        doctor_id: doctor.id.clone(),
        status: doctor.status.to_string(),
    });

    Ok(Json(doctor))
}

pub async fn doctor_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DoctorDashboard>, ApiError> {
    let view = stats::doctor_dashboard(&state.db, &id, validation::today())
        .await
        .map_err(api_error)?;
    Ok(Json(view))
}
