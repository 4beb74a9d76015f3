//! Doctor queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "doctors";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorRow {
    pub id: String,
    pub seq: u64,
    pub name: String,
    pub department: String,
    pub qualification: String,
    pub experience: u32,
    pub availability: Vec<String>,
    pub languages: Vec<String>,
    pub email: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn insert_doctor(pool: &StorePool, mut row: DoctorRow) -> StoreResult<DoctorRow> {
    let ts = now();
    row.created_at = ts.clone();
    row.updated_at = ts;
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_doctor(pool: &StorePool, id: &str) -> StoreResult<DoctorRow> {
    load_row(pool, COLLECTION, "Doctor", id).await
}

pub async fn list_doctors(pool: &StorePool) -> StoreResult<Vec<DoctorRow>> {
    load_all(pool, COLLECTION).await
}

pub async fn list_doctors_by_department(pool: &StorePool, department: &str) -> StoreResult<Vec<DoctorRow>> {
    let all = list_doctors(pool).await?;
    Ok(all.into_iter().filter(|d| d.department == department).collect())
}

pub async fn update_doctor_status(pool: &StorePool, id: &str, status: &str) -> StoreResult<DoctorRow> {
    let mut row = get_doctor(pool, id).await?;
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}
