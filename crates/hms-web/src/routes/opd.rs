//! OPD route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hms_core::opd::{self, model::{OpdForm, OpdRegistration}};
use hms_store::HmsEvent;

use super::{api_error, ApiError};
use crate::state::AppState;

pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<OpdRegistration>>, ApiError> {
    let registrations = opd::list_registrations(&state.db).await.map_err(api_error)?;
    Ok(Json(registrations))
}

pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OpdRegistration>, ApiError> {
    let registration = opd::get_registration(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(registration))
}

pub async fn register_opd(
    State(state): State<AppState>,
    Json(form): Json<OpdForm>,
) -> Result<(StatusCode, Json<OpdRegistration>), ApiError> {
    let registration = opd::register_opd(&state.db, form).await.map_err(api_error)?;

    state.broadcast(HmsEvent::OpdRegistered {
        opd_id: registration.id.clone(),
    });

    Ok((StatusCode::CREATED, Json(registration)))
}
