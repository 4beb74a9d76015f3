//! Patient queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "patients";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientRow {
    pub id: String,
    pub seq: u64,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub address: String,
    pub status: String,
    pub doctor_id: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn insert_patient(pool: &StorePool, mut row: PatientRow) -> StoreResult<PatientRow> {
    let ts = now();
    row.created_at = ts.clone();
    row.updated_at = ts;
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_patient(pool: &StorePool, id: &str) -> StoreResult<PatientRow> {
    load_row(pool, COLLECTION, "Patient", id).await
}

pub async fn list_patients(pool: &StorePool) -> StoreResult<Vec<PatientRow>> {
    load_all(pool, COLLECTION).await
}

pub async fn update_patient_status(pool: &StorePool, id: &str, status: &str) -> StoreResult<PatientRow> {
    let mut row = get_patient(pool, id).await?;
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}
