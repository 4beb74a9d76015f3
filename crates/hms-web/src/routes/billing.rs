//! Billing route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hms_core::billing::{self, model::{Billing, BillingStatus, Invoice, NewBill}};
use hms_store::HmsEvent;
use serde::Deserialize;

use super::{api_error, ApiError, StatusRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BillQuery {
    pub status: Option<String>,
}

fn notify(state: &AppState, bill: &Billing) {
    state.broadcast(HmsEvent::BillUpdated {
        bill_id: bill.id.clone(),
        status: bill.status.to_string(),
    });
}

pub async fn list_bills(
    State(state): State<AppState>,
    Query(query): Query<BillQuery>,
) -> Result<Json<Vec<Billing>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(BillingStatus::parse_input)
        .transpose()
        .map_err(api_error)?;
    let bills = billing::list_bills(&state.db, status).await.map_err(api_error)?;
    Ok(Json(bills))
}

pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Billing>, ApiError> {
    let bill = billing::get_bill(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(bill))
}

pub async fn create_bill(
    State(state): State<AppState>,
    Json(req): Json<NewBill>,
) -> Result<(StatusCode, Json<Billing>), ApiError> {
    let bill = billing::create_bill(&state.db, req).await.map_err(api_error)?;
    notify(&state, &bill);
    Ok((StatusCode::CREATED, Json(bill)))
}

pub async fn update_bill_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Billing>, ApiError> {
    let status = BillingStatus::parse_input(&req.status).map_err(api_error)?;
    let bill = billing::update_bill_status(&state.db, &id, status)
        .await
        .map_err(api_error)?;
    notify(&state, &bill);
    Ok(Json(bill))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice = billing::invoice(&state.db, &id).await.map_err(api_error)?;
    Ok(Json(invoice))
}
