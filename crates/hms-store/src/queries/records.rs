//! Medical record queries.

use serde::{Deserialize, Serialize};

use super::{load_all, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "medical_records";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicalRecordRow {
    pub id: String,
    pub seq: u64,
    pub patient_id: String,
    pub date: String,
    pub record_type: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub file_url: Option<String>,
    pub created_at: String,
}

pub async fn insert_record(pool: &StorePool, mut row: MedicalRecordRow) -> StoreResult<MedicalRecordRow> {
    row.created_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

/// A patient's records in the order they were added.
pub async fn list_records_for_patient(pool: &StorePool, patient_id: &str) -> StoreResult<Vec<MedicalRecordRow>> {
    let all: Vec<MedicalRecordRow> = load_all(pool, COLLECTION).await?;
    Ok(all.into_iter().filter(|r| r.patient_id == patient_id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::in_memory;

    fn row(id: &str, seq: u64, patient_id: &str) -> MedicalRecordRow {
        MedicalRecordRow {
            id: id.to_string(),
            seq,
            patient_id: patient_id.to_string(),
            record_type: "Note".to_string(),
            title: "Admission note".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_patient() {
        let pool = in_memory();
        insert_record(&pool, row("rec1", 1, "pat1")).await.unwrap();
        insert_record(&pool, row("rec2", 2, "pat2")).await.unwrap();
        insert_record(&pool, row("rec3", 3, "pat1")).await.unwrap();

        let ids: Vec<String> = list_records_for_patient(&pool, "pat1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["rec1", "rec3"]);
        assert!(list_records_for_patient(&pool, "pat9").await.unwrap().is_empty());
    }
}
