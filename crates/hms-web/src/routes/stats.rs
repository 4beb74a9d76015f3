//! Dashboard statistics handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use hms_core::stats::{self, model::{DailyStats, DashboardSummary}};
use hms_core::validation;
use serde::Deserialize;

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DailyQuery {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let summary = stats::dashboard_summary(&state.db).await.map_err(api_error)?;
    Ok(Json(summary))
}

pub async fn daily(
    State(state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailyStats>, ApiError> {
    let date = query.date.unwrap_or_else(validation::today);
    let daily = stats::daily_stats(&state.db, date).await.map_err(api_error)?;
    Ok(Json(daily))
}
