//! Prescription route handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hms_core::pharmacy::{self, model::{NewPrescription, Prescription}};
use hms_store::HmsEvent;

use super::{api_error, ApiError};
use crate::state::AppState;

fn notify(state: &AppState, rx: &Prescription) {
    state.broadcast(HmsEvent::PrescriptionUpdated {
        prescription_id: rx.id.clone(),
        status: rx.status.to_string(),
    });
}

pub async fn list_prescriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let all = pharmacy::list_prescriptions(&state.db).await.map_err(api_error)?;
    Ok(Json(all))
}

pub async fn status_counts(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, usize>>, ApiError> {
    let counts = pharmacy::prescription_status_counts(&state.db).await.map_err(api_error)?;
    Ok(Json(counts))
}

pub async fn get_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Prescription>, ApiError> {
    let rx = pharmacy::get_prescription(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(rx))
}

pub async fn create_prescription(
    State(state): State<AppState>,
    Json(req): Json<NewPrescription>,
) -> Result<(StatusCode, Json<Prescription>), ApiError> {
    let rx = pharmacy::create_prescription(&state.db, req).await.map_err(api_error)?;
    notify(&state, &rx);
    Ok((StatusCode::CREATED, Json(rx)))
}

pub async fn fill_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Prescription>, ApiError> {
    let rx = pharmacy::fill_prescription(&state.db, &id).await.map_err(api_error)?;
    notify(&state, &rx);
    Ok(Json(rx))
}

pub async fn cancel_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Prescription>, ApiError> {
    let rx = pharmacy::cancel_prescription(&state.db, &id).await.map_err(api_error)?;
    notify(&state, &rx);
    Ok(Json(rx))
}

pub async fn reopen_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Prescription>, ApiError> {
    let rx = pharmacy::reopen_prescription(&state.db, &id).await.map_err(api_error)?;
    notify(&state, &rx);
    Ok(Json(rx))
}
