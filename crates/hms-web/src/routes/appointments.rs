//! Appointment route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hms_core::appointment::{
    self,
    model::{Appointment, AppointmentFilter, AppointmentForm, AppointmentStatus},
};
use hms_core::billing::{self, model::Billing};
use hms_store::HmsEvent;
use serde::Deserialize;

use super::{api_error, ApiError, StatusRequest};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillAppointmentRequest {
    #[serde(default = "default_service_type")]
    pub service_type: String,
}

fn default_service_type() -> String {
    "Consultation".to_string()
}

fn notify(state: &AppState, appt: &Appointment) {
    state.broadcast(HmsEvent::AppointmentUpdated {
        appointment_id: appt.id.clone(),
        status: appt.status.to_string(),
    });
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = appointment::filter_appointments(&state.db, &filter)
        .await
        .map_err(api_error)?;
    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let appt = appointment::get_appointment(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(appt))
}

pub async fn schedule_appointment(
    State(state): State<AppState>,
    Json(form): Json<AppointmentForm>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appt = appointment::schedule_appointment(&state.db, form)
        .await
        .map_err(api_error)?;
    notify(&state, &appt);
    Ok((StatusCode::CREATED, Json(appt)))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<AppointmentForm>,
) -> Result<Json<Appointment>, ApiError> {
    let appt = appointment::update_appointment(&state.db, &id, form)
        .await
        .map_err(api_error)?;
    notify(&state, &appt);
    Ok(Json(appt))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let status = AppointmentStatus::parse_input(&req.status).map_err(api_error)?;
    let appt = appointment::set_appointment_status(&state.db, &id, status)
        .await
        .map_err(api_error)?;
    notify(&state, &appt);
    Ok(Json(appt))
}

pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let appt = appointment::cancel_appointment(&state.db, &id).await.map_err(api_error)?;
    notify(&state, &appt);
    Ok(Json(appt))
}

pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let appt = appointment::complete_appointment(&state.db, &id).await.map_err(api_error)?;
    notify(&state, &appt);
    Ok(Json(appt))
}

pub async fn bill_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BillAppointmentRequest>,
) -> Result<(StatusCode, Json<Billing>), ApiError> {
    let bill = billing::bill_appointment(&state.db, &id, &req.service_type)
        .await
        .map_err(api_error)?;

    state.broadcast(HmsEvent::BillUpdated {
        bill_id: bill.id.clone(),
        status: bill.status.to_string(),
    });

    Ok((StatusCode::CREATED, Json(bill)))
}
