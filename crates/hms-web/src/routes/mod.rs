//! Route handlers.

pub mod appointments;
pub mod billing;
pub mod doctors;
pub mod health;
pub mod internal;
pub mod lab;
pub mod opd;
pub mod patients;
pub mod prescriptions;
pub mod stats;

use axum::http::StatusCode;
use hms_core::lab::report::GENERATION_FAILED_MESSAGE;
use hms_core::HmsError;
use serde::Deserialize;
use tracing::{error, warn};

/// Error half of every handler result.
pub type ApiError = (StatusCode, String);

/// Map a domain error onto an HTTP status and message.
pub fn api_error(err: HmsError) -> ApiError {
    match &err {
        e if e.is_not_found() => (StatusCode::NOT_FOUND, err.to_string()),
        HmsError::ValidationError(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        HmsError::InvalidStateTransition { .. } => (StatusCode::CONFLICT, err.to_string()),
        HmsError::Generation(failure) => {
            warn!(reason = %failure.reason, "Lab report generation failed");
            (StatusCode::BAD_GATEWAY, GENERATION_FAILED_MESSAGE.to_string())
        }
        _ => {
            error!(error = %err, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Body of the status-change endpoints. Labels are matched leniently.
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}
