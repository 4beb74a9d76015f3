//! OPD registration queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "opd";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpdRow {
    pub id: String,
    pub seq: u64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub department: String,
    pub doctor_id: String,
    pub reason: String,
    pub visit_type: String,
    pub fees: f64,
    pub payment_status: String,
    pub created_at: String,
}

pub async fn insert_registration(pool: &StorePool, mut row: OpdRow) -> StoreResult<OpdRow> {
    row.created_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_registration(pool: &StorePool, id: &str) -> StoreResult<OpdRow> {
    load_row(pool, COLLECTION, "OPD registration", id).await
}

/// Registrations in creation order (oldest first).
pub async fn list_registrations(pool: &StorePool) -> StoreResult<Vec<OpdRow>> {
    load_all(pool, COLLECTION).await
}
