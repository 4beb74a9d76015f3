//! Shared broadcast channel for real-time updates.
//!
//! Command handlers publish an [`HmsEvent`] after every successful mutation;
//! the web server forwards them to connected WebSocket clients.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Update notifications pushed to dashboards.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum HmsEvent {
    /// A patient was registered or changed status.
    PatientUpdated { patient_id: String, status: String },
    /// A medical record was added to a patient's history.
    MedicalRecordAdded { record_id: String, patient_id: String },
    /// A doctor was added or changed status.
    DoctorUpdated { doctor_id: String, status: String },
    /// An appointment was scheduled, edited, cancelled or completed.
    AppointmentUpdated { appointment_id: String, status: String },
    /// A patient was registered for an OPD visit.
    OpdRegistered { opd_id: String },
    /// A bill was created or its status changed.
    BillUpdated { bill_id: String, status: String },
    /// A lab appointment changed status or received a report.
    LabAppointmentUpdated { lab_id: String, status: String },
    /// A prescription was created, filled or cancelled.
    PrescriptionUpdated { prescription_id: String, status: String },
    /// Request a full dashboard refresh.
    DashboardRefresh,
}

/// Type alias for the broadcast sender.
pub type BroadcastSender = broadcast::Sender<HmsEvent>;

/// Type alias for the broadcast receiver.
pub type BroadcastReceiver = broadcast::Receiver<HmsEvent>;

/// Create a new broadcast channel with default capacity.
pub fn create_broadcast_channel() -> BroadcastSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}
