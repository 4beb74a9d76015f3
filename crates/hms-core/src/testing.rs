//! Fixtures shared by unit tests.

use hms_store::StorePool;

use crate::appointment::model::{self as appt, AppointmentForm};
use crate::doctor::{self, model::{Department, Doctor, NewDoctor}};
use crate::labels::Gender;
use crate::opd::model::{self as opd, OpdForm};
use crate::patient::model::NewPatient;
use crate::validation;

pub(crate) fn new_doctor(name: &str, department: Department) -> NewDoctor {
    NewDoctor {
        name: name.to_string(),
        department,
        qualification: "MBBS, MD".to_string(),
        experience: 8,
        languages: "English, Hindi".to_string(),
        email: "doctor@hospital.org".to_string(),
        status: None,
    }
}

pub(crate) async fn add_test_doctor(pool: &StorePool) -> Doctor {
    doctor::add_doctor(pool, new_doctor("Dr. Anil Sharma", Department::General))
        .await
        .unwrap()
}

pub(crate) fn new_patient(doctor_id: &str, name: &str) -> NewPatient {
    NewPatient {
        name: name.to_string(),
        age: 42,
        gender: Gender::Female,
        contact: "9876543210".to_string(),
        address: "12 MG Road, Pune".to_string(),
        status: None,
        doctor_id: doctor_id.to_string(),
    }
}

pub(crate) fn appointment_form(doctor_id: &str, patient_name: &str, days_ahead: i64) -> AppointmentForm {
    AppointmentForm {
        patient_name: patient_name.to_string(),
        patient_age: 35,
        patient_gender: Gender::Female,
        patient_contact: "9876543210".to_string(),
        doctor_id: doctor_id.to_string(),
        date: validation::today() + chrono::Duration::days(days_ahead),
        time: "10:00 AM".to_string(),
        reason: "Follow-up consultation".to_string(),
        mode: appt::default_mode(),
        duration: appt::default_duration(),
        fees: appt::default_fees(),
        status: appt::default_status(),
        payment_status: appt::default_payment_status(),
    }
}

pub(crate) fn opd_form(doctor_id: &str, patient_name: &str) -> OpdForm {
    OpdForm {
        patient_name: patient_name.to_string(),
        age: 29,
        gender: Gender::Male,
        contact: "9123456780".to_string(),
        time: "11:30 AM".to_string(),
        department: Department::General,
        doctor_id: doctor_id.to_string(),
        reason: "Fever and cough".to_string(),
        visit_type: opd::default_visit_type(),
        fees: opd::default_fees(),
        payment_status: opd::default_payment_status(),
    }
}
