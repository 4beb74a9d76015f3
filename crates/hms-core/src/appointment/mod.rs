//! Appointment scheduling.

pub mod model;

use chrono::NaiveDate;
use hms_store::appointments as queries;
use hms_store::appointments::AppointmentRow;
use hms_store::patients::PatientRow;
use hms_store::StorePool;
use tracing::info;

use crate::doctor;
use crate::error::{HmsError, HmsResult};
use crate::patient::model::PatientStatus;
use crate::validation;
use model::{Appointment, AppointmentFilter, AppointmentForm, AppointmentStatus};

/// Validated form fields, ready to be written.
struct CleanForm {
    patient_name: String,
    patient_contact: String,
    time: String,
    reason: String,
}

fn clean(form: &AppointmentForm) -> HmsResult<CleanForm> {
    let clean = CleanForm {
        patient_name: validation::required("Patient name", &form.patient_name)?,
        patient_contact: validation::contact(&form.patient_contact)?,
        time: validation::time_of_day(&form.time)?,
        reason: validation::required("Reason for appointment", &form.reason)?,
    };
    validation::duration(form.duration)?;
    validation::non_negative("Fees", form.fees)?;
    Ok(clean)
}

fn to_row(id: String, seq: u64, patient_id: String, form: &AppointmentForm, clean: CleanForm) -> AppointmentRow {
    AppointmentRow {
        id,
        seq,
        patient_id,
        patient_name: clean.patient_name,
        patient_age: form.patient_age,
        patient_gender: form.patient_gender.as_str().to_string(),
        patient_contact: clean.patient_contact,
        doctor_id: form.doctor_id.trim().to_string(),
        date: validation::format_date(form.date),
        time: clean.time,
        reason: clean.reason,
        status: form.status.as_str().to_string(),
        mode: form.mode.as_str().to_string(),
        duration: form.duration,
        fees: form.fees,
        payment_status: form.payment_status.as_str().to_string(),
        ..Default::default()
    }
}

/// Register a walk-in patient and book them with a doctor.
///
/// Every scheduled appointment gets a fresh patient record under the booked
/// doctor, so bills raised from it can be invoiced.
pub async fn schedule_appointment(pool: &StorePool, form: AppointmentForm) -> HmsResult<Appointment> {
    let clean = clean(&form)?;
    validation::not_past(form.date, validation::today())?;
    let doctor = doctor::get_doctor(pool, form.doctor_id.trim()).await?;

    let patient_seq = hms_store::next_id(pool, hms_store::patients::COLLECTION).await?;
    let patient = PatientRow {
        id: format!("pat{}", patient_seq),
        seq: patient_seq,
        name: clean.patient_name.clone(),
        age: form.patient_age,
        gender: form.patient_gender.as_str().to_string(),
        contact: clean.patient_contact.clone(),
        status: PatientStatus::Admitted.as_str().to_string(),
        doctor_id: doctor.id.clone(),
        ..Default::default()
    };
    let patient = hms_store::patients::insert_patient(pool, patient).await?;

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = to_row(format!("apt{}", seq), seq, patient.id, &form, clean);

    let row = queries::insert_appointment(pool, row).await?;
    info!(
        appointment_id = %row.id,
        doctor = %doctor.name,
        date = %row.date,
        "Scheduled appointment"
    );
    Appointment::from_row(row)
}

/// Apply an edited form. The appointment and patient IDs never change.
pub async fn update_appointment(pool: &StorePool, id: &str, form: AppointmentForm) -> HmsResult<Appointment> {
    let current = get_appointment(pool, id).await?;
    let clean = clean(&form)?;

    if !current.status.can_transition_to(&form.status) {
        return Err(HmsError::InvalidStateTransition {
            from: current.status.as_str().to_string(),
            to: form.status.as_str().to_string(),
        });
    }
    if form.date != current.date {
        validation::not_past(form.date, validation::today())?;
    }
    if form.doctor_id.trim() != current.doctor_id {
        doctor::get_doctor(pool, form.doctor_id.trim()).await?;
    }

    let row = to_row(id.to_string(), 0, current.patient_id.clone(), &form, clean);
    let row = queries::update_appointment(pool, row)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::AppointmentNotFound))?;
    info!(appointment_id = %id, "Updated appointment");
    Appointment::from_row(row)
}

/// Move an appointment to a new status.
pub async fn set_appointment_status(
    pool: &StorePool,
    id: &str,
    status: AppointmentStatus,
) -> HmsResult<Appointment> {
    let current = get_appointment(pool, id).await?;
    if !current.status.can_transition_to(&status) {
        return Err(HmsError::InvalidStateTransition {
            from: current.status.as_str().to_string(),
            to: status.as_str().to_string(),
        });
    }

    let row = queries::update_appointment_status(pool, id, status.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::AppointmentNotFound))?;
    info!(appointment_id = %id, status = %status, "Appointment status changed");
    Appointment::from_row(row)
}

/// Cancel an appointment.
pub async fn cancel_appointment(pool: &StorePool, id: &str) -> HmsResult<Appointment> {
    set_appointment_status(pool, id, AppointmentStatus::Cancelled).await
}

/// Mark an appointment as completed.
pub async fn complete_appointment(pool: &StorePool, id: &str) -> HmsResult<Appointment> {
    set_appointment_status(pool, id, AppointmentStatus::Completed).await
}

/// Get an appointment by ID.
pub async fn get_appointment(pool: &StorePool, id: &str) -> HmsResult<Appointment> {
    let row = queries::get_appointment(pool, id)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::AppointmentNotFound))?;
    Appointment::from_row(row)
}

/// List all appointments in booking order.
pub async fn list_appointments(pool: &StorePool) -> HmsResult<Vec<Appointment>> {
    let rows = queries::list_appointments(pool).await?;
    rows.into_iter().map(Appointment::from_row).collect()
}

/// Appointments matching a filter.
pub async fn filter_appointments(pool: &StorePool, filter: &AppointmentFilter) -> HmsResult<Vec<Appointment>> {
    let all = list_appointments(pool).await?;
    Ok(all.into_iter().filter(|a| filter.matches(a)).collect())
}

/// A doctor's appointments from `today` on, earliest first.
pub async fn upcoming_for_doctor(pool: &StorePool, doctor_id: &str, today: NaiveDate) -> HmsResult<Vec<Appointment>> {
    let rows = queries::list_appointments_by_doctor(pool, doctor_id).await?;
    let mut upcoming: Vec<Appointment> = rows
        .into_iter()
        .map(Appointment::from_row)
        .collect::<HmsResult<Vec<_>>>()?
        .into_iter()
        .filter(|a| a.date >= today)
        .collect();
    upcoming.sort_by_key(Appointment::slot_key);
    Ok(upcoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{add_test_doctor, appointment_form};
    use model::{AppointmentMode, PaymentStatus};

    #[tokio::test]
    async fn test_schedule_allocates_ids() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;

        let first = schedule_appointment(&pool, appointment_form(&doctor.id, "Kavya Iyer", 1)).await.unwrap();
        let second = schedule_appointment(&pool, appointment_form(&doctor.id, "Arjun Nair", 2)).await.unwrap();

        assert_eq!(first.id, "apt1");
        assert_eq!(second.id, "apt2");
        assert_ne!(first.patient_id, second.patient_id);
        assert_eq!(first.status, AppointmentStatus::Confirmed);
        assert_eq!(first.mode, AppointmentMode::InPerson);
    }

    #[tokio::test]
    async fn test_schedule_registers_patient() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;

        let appt = schedule_appointment(&pool, appointment_form(&doctor.id, "Kavya Iyer", 1)).await.unwrap();

        let patient = crate::patient::get_patient(&pool, &appt.patient_id).await.unwrap();
        assert_eq!(patient.name, "Kavya Iyer");
        assert_eq!(patient.age, 35);
        assert_eq!(patient.contact, "9876543210");
        assert_eq!(patient.doctor_id, doctor.id);
        assert_eq!(patient.status, PatientStatus::Admitted);
    }

    #[tokio::test]
    async fn test_schedule_rejects_past_date_and_bad_time() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;

        let mut form = appointment_form(&doctor.id, "Kavya Iyer", 0);
        form.date = validation::today().pred_opt().unwrap();
        assert!(matches!(schedule_appointment(&pool, form).await, Err(HmsError::ValidationError(_))));

        let mut form = appointment_form(&doctor.id, "Kavya Iyer", 0);
        form.time = "25:00".to_string();
        assert!(matches!(schedule_appointment(&pool, form).await, Err(HmsError::ValidationError(_))));

        let mut form = appointment_form(&doctor.id, "Kavya Iyer", 0);
        form.duration = 10;
        assert!(matches!(schedule_appointment(&pool, form).await, Err(HmsError::ValidationError(_))));

        assert!(list_appointments(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_ids() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let original = schedule_appointment(&pool, appointment_form(&doctor.id, "Kavya Iyer", 1)).await.unwrap();

        let mut form = appointment_form(&doctor.id, "Kavya R. Iyer", 1);
        form.payment_status = PaymentStatus::Paid;
        form.time = "4:15 pm".to_string();
        let updated = update_appointment(&pool, &original.id, form).await.unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.patient_id, original.patient_id);
        assert_eq!(updated.patient_name, "Kavya R. Iyer");
        assert_eq!(updated.time, "4:15 PM");
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_cancelled_is_final() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let appt = schedule_appointment(&pool, appointment_form(&doctor.id, "Kavya Iyer", 1)).await.unwrap();

        let cancelled = cancel_appointment(&pool, &appt.id).await.unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

        let err = complete_appointment(&pool, &appt.id).await.unwrap_err();
        assert!(matches!(err, HmsError::InvalidStateTransition { .. }));

        let mut form = appointment_form(&doctor.id, "Kavya Iyer", 1);
        form.status = AppointmentStatus::Confirmed;
        assert!(matches!(
            update_appointment(&pool, &appt.id, form).await,
            Err(HmsError::InvalidStateTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_filter_and_upcoming() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let today = validation::today();

        let mut late = appointment_form(&doctor.id, "Kavya Iyer", 0);
        late.time = "3:00 PM".to_string();
        schedule_appointment(&pool, late).await.unwrap();
        let mut early = appointment_form(&doctor.id, "Arjun Nair", 0);
        early.time = "9:00 AM".to_string();
        schedule_appointment(&pool, early).await.unwrap();
        schedule_appointment(&pool, appointment_form(&doctor.id, "Kavita Shah", 3)).await.unwrap();
        cancel_appointment(&pool, "apt3").await.unwrap();

        let filter = AppointmentFilter {
            date: Some(today),
            ..Default::default()
        };
        assert_eq!(filter_appointments(&pool, &filter).await.unwrap().len(), 2);

        let filter = AppointmentFilter {
            search: Some("kav".to_string()),
            status: Some(AppointmentStatus::Confirmed),
            ..Default::default()
        };
        let found = filter_appointments(&pool, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].patient_name, "Kavya Iyer");

        let upcoming = upcoming_for_doctor(&pool, &doctor.id, today).await.unwrap();
        let names: Vec<&str> = upcoming.iter().map(|a| a.patient_name.as_str()).collect();
        assert_eq!(names, vec!["Arjun Nair", "Kavya Iyer", "Kavita Shah"]);
    }
}
