//! Billing queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "bills";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillRow {
    pub id: String,
    pub seq: u64,
    pub patient_id: String,
    pub appointment_id: String,
    pub doctor_id: String,
    pub amount: f64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub status: String,
    pub service_type: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn insert_bill(pool: &StorePool, mut row: BillRow) -> StoreResult<BillRow> {
    let ts = now();
    row.created_at = ts.clone();
    row.updated_at = ts;
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_bill(pool: &StorePool, id: &str) -> StoreResult<BillRow> {
    load_row(pool, COLLECTION, "Bill", id).await
}

pub async fn list_bills(pool: &StorePool) -> StoreResult<Vec<BillRow>> {
    load_all(pool, COLLECTION).await
}

pub async fn list_bills_by_status(pool: &StorePool, status: &str) -> StoreResult<Vec<BillRow>> {
    let all = list_bills(pool).await?;
    Ok(all.into_iter().filter(|b| b.status == status).collect())
}

pub async fn update_bill_status(pool: &StorePool, id: &str, status: &str) -> StoreResult<BillRow> {
    let mut row = get_bill(pool, id).await?;
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}
