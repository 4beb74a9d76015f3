//! Prescription queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "prescriptions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrescriptionRow {
    pub id: String,
    pub seq: u64,
    pub patient_id: String,
    pub medication: String,
    pub dosage: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn insert_prescription(pool: &StorePool, mut row: PrescriptionRow) -> StoreResult<PrescriptionRow> {
    let ts = now();
    row.created_at = ts.clone();
    row.updated_at = ts;
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_prescription(pool: &StorePool, id: &str) -> StoreResult<PrescriptionRow> {
    load_row(pool, COLLECTION, "Prescription", id).await
}

pub async fn list_prescriptions(pool: &StorePool) -> StoreResult<Vec<PrescriptionRow>> {
    load_all(pool, COLLECTION).await
}

pub async fn update_prescription_status(pool: &StorePool, id: &str, status: &str) -> StoreResult<PrescriptionRow> {
    let mut row = get_prescription(pool, id).await?;
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}
