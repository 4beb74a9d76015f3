//! Entity queries.
//!
//! Each module owns one collection: its row type and the reads and writes
//! allowed on it. Rows are string-typed; the domain layer parses them.

pub mod appointments;
pub mod bills;
pub mod doctors;
pub mod lab;
pub mod opd;
pub mod patients;
pub mod prescriptions;
pub mod records;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::client::{StoreError, StorePool, StoreResult};

/// Allocate the next number of a collection's id sequence.
pub async fn next_id(pool: &StorePool, collection: &str) -> StoreResult<u64> {
    pool.next_sequence(collection).await
}

pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) async fn save_row<T: Serialize>(
    pool: &StorePool,
    collection: &str,
    id: &str,
    row: &T,
    seq: u64,
) -> StoreResult<()> {
    let json = serde_json::to_string(row)?;
    pool.put(collection, id, json, seq as i64).await
}

pub(crate) async fn load_row<T: DeserializeOwned>(
    pool: &StorePool,
    collection: &str,
    label: &str,
    id: &str,
) -> StoreResult<T> {
    match pool.fetch(collection, id).await? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Err(StoreError::NotFound(format!("{}: {}", label, id))),
    }
}

pub(crate) async fn load_all<T: DeserializeOwned>(
    pool: &StorePool,
    collection: &str,
) -> StoreResult<Vec<T>> {
    let docs = pool.fetch_all(collection).await?;
    let mut rows = Vec::with_capacity(docs.len());
    for json in docs {
        match serde_json::from_str::<T>(&json) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(collection, error = %e, "Skipping unreadable row"),
        }
    }
    Ok(rows)
}
