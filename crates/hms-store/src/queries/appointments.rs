//! Appointment queries.

use serde::{Deserialize, Serialize};

use super::{load_all, load_row, now, save_row};
use crate::client::{StorePool, StoreResult};

pub const COLLECTION: &str = "appointments";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub id: String,
    pub seq: u64,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub patient_contact: String,
    pub doctor_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub reason: String,
    pub status: String,
    pub mode: String,
    pub duration: u32,
    pub fees: f64,
    pub payment_status: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn insert_appointment(pool: &StorePool, mut row: AppointmentRow) -> StoreResult<AppointmentRow> {
    let ts = now();
    row.created_at = ts.clone();
    row.updated_at = ts;
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn get_appointment(pool: &StorePool, id: &str) -> StoreResult<AppointmentRow> {
    load_row(pool, COLLECTION, "Appointment", id).await
}

pub async fn list_appointments(pool: &StorePool) -> StoreResult<Vec<AppointmentRow>> {
    load_all(pool, COLLECTION).await
}

pub async fn list_appointments_by_doctor(pool: &StorePool, doctor_id: &str) -> StoreResult<Vec<AppointmentRow>> {
    let all = list_appointments(pool).await?;
    Ok(all.into_iter().filter(|a| a.doctor_id == doctor_id).collect())
}

/// Replace an existing appointment. `id`, `seq`, `patient_id` and `created_at`
/// are taken from the stored row.
pub async fn update_appointment(pool: &StorePool, row: AppointmentRow) -> StoreResult<AppointmentRow> {
    let existing = get_appointment(pool, &row.id).await?;
    let row = AppointmentRow {
        seq: existing.seq,
        patient_id: existing.patient_id,
        created_at: existing.created_at,
        updated_at: now(),
        ..row
    };
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

pub async fn update_appointment_status(pool: &StorePool, id: &str, status: &str) -> StoreResult<AppointmentRow> {
    let mut row = get_appointment(pool, id).await?;
    row.status = status.to_string();
    row.updated_at = now();
    save_row(pool, COLLECTION, &row.id, &row, row.seq).await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::in_memory;

    #[tokio::test]
    async fn test_update_preserves_identity_fields() {
        let pool = in_memory();
        insert_appointment(&pool, AppointmentRow {
            id: "apt1".to_string(),
            seq: 1,
            patient_id: "pat4".to_string(),
            patient_name: "Old".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        let updated = update_appointment(&pool, AppointmentRow {
            id: "apt1".to_string(),
            patient_id: "pat999".to_string(),
            patient_name: "New".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(updated.seq, 1);
        assert_eq!(updated.patient_id, "pat4");
        assert_eq!(updated.patient_name, "New");
        assert!(!updated.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_appointment_fails() {
        let pool = in_memory();
        let result = update_appointment(&pool, AppointmentRow {
            id: "apt7".to_string(),
            ..Default::default()
        })
        .await;
        assert!(result.is_err());
    }
}
