//! Lab appointment queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "lab_appointments";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabAppointmentRow {
    pub id: String,
    pub seq: u64,
    pub patient_id: String,
    pub test_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub status: String,
    /// JSON-encoded report, present once a report has been saved.
    pub report: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn insert_lab_appointment(pool: &StorePool, mut row: LabAppointmentRow) -> StoreResult<LabAppointmentRow> {
    let ts = now();
    row.created_at = ts.clone();
    row.updated_at = ts;
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_lab_appointment(pool: &StorePool, id: &str) -> StoreResult<LabAppointmentRow> {
    load_row(pool, COLLECTION, "Lab appointment", id).await
}

pub async fn list_lab_appointments(pool: &StorePool) -> StoreResult<Vec<LabAppointmentRow>> {
    load_all(pool, COLLECTION).await
}

pub async fn update_lab_status(pool: &StorePool, id: &str, status: &str) -> StoreResult<LabAppointmentRow> {
    let mut row = get_lab_appointment(pool, id).await?;
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

/// Attach a report and set the status in one write.
pub async fn save_lab_report(
    pool: &StorePool,
    id: &str,
    report_json: &str,
    status: &str,
) -> StoreResult<LabAppointmentRow> {
    let mut row = get_lab_appointment(pool, id).await?;
    row.report = Some(report_json.to_string());
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}
