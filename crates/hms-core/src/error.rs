//! Centralized error types for HMS.

use hms_store::StoreError;
use thiserror::Error;

use crate::lab::report::GenerationFailure;

/// Main error type for HMS operations.
#[derive(Error, Debug)]
pub enum HmsError {
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("OPD registration not found: {0}")]
    RegistrationNotFound(String),

    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Lab appointment not found: {0}")]
    LabAppointmentNotFound(String),

    #[error("Prescription not found: {0}")]
    PrescriptionNotFound(String),

    #[error("Invalid state transition: cannot move from '{from}' to '{to}'")]
    InvalidStateTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for HMS operations.
pub type HmsResult<T> = Result<T, HmsError>;

impl HmsError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PatientNotFound(_)
                | Self::DoctorNotFound(_)
                | Self::AppointmentNotFound(_)
                | Self::RegistrationNotFound(_)
                | Self::BillNotFound(_)
                | Self::LabAppointmentNotFound(_)
                | Self::PrescriptionNotFound(_)
                | Self::Store(StoreError::NotFound(_))
        )
    }

    /// Map a store miss onto the entity-specific variant.
    pub(crate) fn from_store(err: StoreError, id: &str, missing: fn(String) -> HmsError) -> Self {
        match err {
            StoreError::NotFound(_) => missing(id.to_string()),
            e => Self::Store(e),
        }
    }
}
