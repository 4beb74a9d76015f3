//! Billing and invoices.

pub mod model;

use hms_store::bills as queries;
use hms_store::bills::BillRow;
use hms_store::StorePool;
use tracing::{error, info};

use crate::appointment;
use crate::appointment::model::{AppointmentStatus, PaymentStatus};
use crate::doctor;
use crate::error::{HmsError, HmsResult};
use crate::patient;
use crate::validation;
use model::{Billing, BillingStatus, Invoice, NewBill};

/// Raise a bill.
pub async fn create_bill(pool: &StorePool, input: NewBill) -> HmsResult<Billing> {
    let patient_id = validation::required("Patient", &input.patient_id)?;
    let service_type = validation::required("Service type", &input.service_type)?;
    let amount = validation::non_negative("Amount", input.amount)?;
    let patient = patient::get_patient(pool, &patient_id).await?;
    let doctor = doctor::get_doctor(pool, input.doctor_id.trim()).await?;

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = BillRow {
        id: format!("bill{}", seq),
        seq,
        patient_id: patient.id,
        appointment_id: input.appointment_id.trim().to_string(),
        doctor_id: doctor.id,
        amount,
        date: validation::format_date(input.date),
        status: input.status.unwrap_or(BillingStatus::Pending).as_str().to_string(),
        service_type,
        ..Default::default()
    };

    let row = queries::insert_bill(pool, row).await?;
    info!(bill_id = %row.id, amount = row.amount, "Created bill");
    Billing::from_row(row)
}

/// Raise the consultation bill for an appointment.
///
/// The amount is the appointment fee; a fully paid appointment yields a paid bill.
pub async fn bill_appointment(pool: &StorePool, appointment_id: &str, service_type: &str) -> HmsResult<Billing> {
    let appt = appointment::get_appointment(pool, appointment_id).await?;
    if appt.status == AppointmentStatus::Cancelled {
        return Err(HmsError::validation(format!(
            "Appointment {} is cancelled and cannot be billed",
            appt.id
        )));
    }

    let status = match appt.payment_status {
        PaymentStatus::Paid => BillingStatus::Paid,
        PaymentStatus::Pending | PaymentStatus::PartiallyPaid => BillingStatus::Pending,
    };

    create_bill(
        pool,
        NewBill {
            patient_id: appt.patient_id,
            appointment_id: appt.id,
            doctor_id: appt.doctor_id,
            amount: appt.fees,
            date: appt.date,
            status: Some(status),
            service_type: service_type.to_string(),
        },
    )
    .await
}

/// Get a bill by ID.
pub async fn get_bill(pool: &StorePool, id: &str) -> HmsResult<Billing> {
    let row = queries::get_bill(pool, id)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::BillNotFound))?;
    Billing::from_row(row)
}

/// List bills, optionally only those with a given status.
pub async fn list_bills(pool: &StorePool, status: Option<BillingStatus>) -> HmsResult<Vec<Billing>> {
    let rows = match status {
        Some(s) => queries::list_bills_by_status(pool, s.as_str()).await?,
        None => queries::list_bills(pool).await?,
    };
    rows.into_iter().map(Billing::from_row).collect()
}

/// Change a bill's status.
pub async fn update_bill_status(pool: &StorePool, id: &str, status: BillingStatus) -> HmsResult<Billing> {
    let row = queries::update_bill_status(pool, id, status.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::BillNotFound))?;
    info!(bill_id = %id, status = %status, "Bill status changed");
    Billing::from_row(row)
}

/// Assemble the printable invoice. Both the patient and the doctor must exist.
pub async fn invoice(pool: &StorePool, bill_id: &str) -> HmsResult<Invoice> {
    let bill = get_bill(pool, bill_id).await?;

    let patient = patient::get_patient(pool, &bill.patient_id).await;
    let doctor = doctor::get_doctor(pool, &bill.doctor_id).await;
    let (patient, doctor) = match (patient, doctor) {
        (Ok(p), Ok(d)) => (p, d),
        (patient, doctor) => {
            error!(
                bill_id = %bill.id,
                patient_found = patient.is_ok(),
                doctor_found = doctor.is_ok(),
                "Could not find details for invoice"
            );
            return Err(patient.err().or(doctor.err()).unwrap_or_else(|| {
                HmsError::BillNotFound(bill.id.clone())
            }));
        }
    };

    Ok(Invoice {
        invoice_number: bill.id.to_uppercase(),
        bill,
        patient,
        doctor,
    })
}

/// Sum of all paid bills.
pub fn total_revenue(bills: &[Billing]) -> f64 {
    bills
        .iter()
        .filter(|b| b.status == BillingStatus::Paid)
        .map(|b| b.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{add_test_doctor, appointment_form, new_patient};
    use chrono::NaiveDate;

    fn bill_for(patient_id: &str, doctor_id: &str, amount: f64, status: BillingStatus) -> NewBill {
        NewBill {
            patient_id: patient_id.to_string(),
            appointment_id: String::new(),
            doctor_id: doctor_id.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            status: Some(status),
            service_type: "Consultation".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_filter() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        for name in ["Asha Verma", "Rohan Das", "Meera Pillai"] {
            patient::register_patient(&pool, new_patient(&doctor.id, name)).await.unwrap();
        }

        create_bill(&pool, bill_for("pat1", &doctor.id, 500.0, BillingStatus::Paid)).await.unwrap();
        create_bill(&pool, bill_for("pat2", &doctor.id, 1200.0, BillingStatus::Pending)).await.unwrap();
        create_bill(&pool, bill_for("pat3", &doctor.id, 300.0, BillingStatus::Paid)).await.unwrap();

        let paid = list_bills(&pool, Some(BillingStatus::Paid)).await.unwrap();
        assert_eq!(paid.len(), 2);

        let all = list_bills(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(total_revenue(&all), 800.0);

        let overdue = update_bill_status(&pool, "bill2", BillingStatus::Overdue).await.unwrap();
        assert_eq!(overdue.status, BillingStatus::Overdue);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_amount() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let result = create_bill(&pool, bill_for("pat1", &doctor.id, -5.0, BillingStatus::Paid)).await;
        assert!(matches!(result, Err(HmsError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_bill_appointment_copies_fee() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let mut form = appointment_form(&doctor.id, "Kavya Iyer", 1);
        form.fees = 750.0;
        form.payment_status = PaymentStatus::Paid;
        let appt = appointment::schedule_appointment(&pool, form).await.unwrap();

        let bill = bill_appointment(&pool, &appt.id, "Consultation").await.unwrap();
        assert_eq!(bill.amount, 750.0);
        assert_eq!(bill.status, BillingStatus::Paid);
        assert_eq!(bill.appointment_id, appt.id);
        assert_eq!(bill.patient_id, appt.patient_id);

        appointment::cancel_appointment(&pool, &appt.id).await.unwrap();
        assert!(bill_appointment(&pool, &appt.id, "Consultation").await.is_err());
    }

    #[tokio::test]
    async fn test_invoice_requires_patient_and_doctor() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let patient = patient::register_patient(&pool, new_patient(&doctor.id, "Asha Verma")).await.unwrap();

        create_bill(&pool, bill_for(&patient.id, &doctor.id, 500.0, BillingStatus::Paid)).await.unwrap();
        let inv = invoice(&pool, "bill1").await.unwrap();
        assert_eq!(inv.invoice_number, "BILL1");
        assert_eq!(inv.patient.name, "Asha Verma");

        assert!(matches!(invoice(&pool, "bill9").await, Err(HmsError::BillNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_requires_known_patient() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;

        let result = create_bill(&pool, bill_for("pat404", &doctor.id, 500.0, BillingStatus::Paid)).await;
        assert!(matches!(result, Err(HmsError::PatientNotFound(ref id)) if id == "pat404"));
        assert!(list_bills(&pool, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_appointment_bill_can_be_invoiced() {
        let pool = hms_store::in_memory();
        let doctor = add_test_doctor(&pool).await;
        let appt = appointment::schedule_appointment(&pool, appointment_form(&doctor.id, "Kavya Iyer", 1))
            .await
            .unwrap();

        let bill = bill_appointment(&pool, &appt.id, "Consultation").await.unwrap();
        let inv = invoice(&pool, &bill.id).await.unwrap();

        assert_eq!(inv.invoice_number, bill.id.to_uppercase());
        assert_eq!(inv.patient.id, appt.patient_id);
        assert_eq!(inv.patient.name, "Kavya Iyer");
        assert_eq!(inv.doctor.id, doctor.id);
    }
}
