//! Laboratory scheduling and reporting.

pub mod model;
pub mod report;

use hms_store::lab as queries;
use hms_store::lab::LabAppointmentRow;
use hms_store::StorePool;
use tracing::{info, warn};

use crate::error::{HmsError, HmsResult};
use crate::patient;
use crate::validation;
use model::{LabAppointment, LabStatus, LabStatusCounts, NewLabAppointment};
use report::{LabReport, LabTestRequest, ReportGenerator};

/// Schedule a lab test for an existing patient.
pub async fn schedule_lab_test(pool: &StorePool, input: NewLabAppointment) -> HmsResult<LabAppointment> {
    let test_name = validation::required("Test name", &input.test_name)?;
    let date = validation::not_past(input.date, validation::today())?;
    let patient = patient::get_patient(pool, input.patient_id.trim()).await?;

    let seq = hms_store::next_id(pool, queries::COLLECTION).await?;
    let row = LabAppointmentRow {
        id: format!("lab{}", seq),
        seq,
        patient_id: patient.id,
        test_name,
        date: validation::format_date(date),
        status: LabStatus::Scheduled.as_str().to_string(),
        ..Default::default()
    };

    let row = queries::insert_lab_appointment(pool, row).await?;
    info!(lab_id = %row.id, test = %row.test_name, "Scheduled lab test");
    LabAppointment::from_row(row)
}

/// Get a lab appointment by ID.
pub async fn get_lab_appointment(pool: &StorePool, id: &str) -> HmsResult<LabAppointment> {
    let row = queries::get_lab_appointment(pool, id)
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::LabAppointmentNotFound))?;
    LabAppointment::from_row(row)
}

pub async fn list_lab_appointments(pool: &StorePool) -> HmsResult<Vec<LabAppointment>> {
    let rows = queries::list_lab_appointments(pool).await?;
    rows.into_iter().map(LabAppointment::from_row).collect()
}

/// Count lab appointments per status.
pub async fn lab_status_counts(pool: &StorePool) -> HmsResult<LabStatusCounts> {
    let labs = list_lab_appointments(pool).await?;
    Ok(LabStatusCounts::tally(labs.iter().map(|l| &l.status)))
}

/// Close a scheduled lab appointment.
pub async fn update_lab_status(pool: &StorePool, id: &str, status: LabStatus) -> HmsResult<LabAppointment> {
    let lab = get_lab_appointment(pool, id).await?;
    if lab.status != LabStatus::Scheduled || status == LabStatus::Scheduled {
        return Err(HmsError::InvalidStateTransition {
            from: lab.status.to_string(),
            to: status.to_string(),
        });
    }

    let row = queries::update_lab_status(pool, id, status.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::LabAppointmentNotFound))?;
    info!(lab_id = %id, status = %status, "Lab status changed");
    LabAppointment::from_row(row)
}

/// Prepare a report for editing.
///
/// An existing report is returned as a copy. Otherwise the generator drafts
/// one; without a generator, or if it fails, the draft is a blank one-row
/// report.
pub async fn draft_report(
    pool: &StorePool,
    id: &str,
    generator: Option<&dyn ReportGenerator>,
) -> HmsResult<LabReport> {
    let lab = get_lab_appointment(pool, id).await?;
    if lab.status == LabStatus::Cancelled {
        return Err(HmsError::validation(format!("Lab appointment {} is cancelled", lab.id)));
    }
    if let Some(existing) = lab.report_data {
        return Ok(existing);
    }

    let Some(generator) = generator else {
        return Ok(LabReport::blank());
    };
    let request = LabTestRequest::new(&lab.test_name)?;
    match generator.generate_lab_report(&request).await {
        Ok(report) => Ok(report),
        Err(e) => {
            warn!(lab_id = %lab.id, error = %e, "Falling back to a blank report");
            Ok(LabReport::blank())
        }
    }
}

/// Store a completed report and mark the appointment Completed.
pub async fn save_report(pool: &StorePool, id: &str, report: &LabReport) -> HmsResult<LabAppointment> {
    report.validate_complete()?;
    let lab = get_lab_appointment(pool, id).await?;
    if lab.status == LabStatus::Cancelled {
        return Err(HmsError::InvalidStateTransition {
            from: lab.status.to_string(),
            to: LabStatus::Completed.to_string(),
        });
    }

    let json = serde_json::to_string(report)?;
    let row = queries::save_lab_report(pool, id, &json, LabStatus::Completed.as_str())
        .await
        .map_err(|e| HmsError::from_store(e, id, HmsError::LabAppointmentNotFound))?;
    info!(lab_id = %id, rows = report.results.len(), "Saved lab report");
    LabAppointment::from_row(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{add_test_doctor, new_patient};
    use async_trait::async_trait;
    use report::{AnalyteResult, GenerationFailure};

    struct FixedGenerator(Option<LabReport>);

    #[async_trait]
    impl ReportGenerator for FixedGenerator {
        async fn generate_lab_report(&self, _request: &LabTestRequest) -> Result<LabReport, GenerationFailure> {
            self.0.clone().ok_or_else(|| GenerationFailure::new("backend down"))
        }
    }

    fn cbc_report() -> LabReport {
        LabReport {
            results: vec![AnalyteResult {
                analyte: "Hemoglobin".to_string(),
                result: "14.2 g/dL".to_string(),
                reference_range: "13.5-17.5 g/dL".to_string(),
            }],
            interpretation: "Normal blood count.".to_string(),
        }
    }

    async fn scheduled(pool: &StorePool) -> LabAppointment {
        let doctor = add_test_doctor(pool).await;
        let patient = patient::register_patient(pool, new_patient(&doctor.id, "Ravi Kumar")).await.unwrap();
        schedule_lab_test(pool, NewLabAppointment {
            patient_id: patient.id,
            test_name: "Complete Blood Count".to_string(),
            date: validation::today(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_schedule_requires_patient() {
        let pool = hms_store::in_memory();
        let result = schedule_lab_test(&pool, NewLabAppointment {
            patient_id: "pat9".to_string(),
            test_name: "Lipid Profile".to_string(),
            date: validation::today(),
        })
        .await;
        assert!(matches!(result, Err(HmsError::PatientNotFound(_))));

        let lab = scheduled(&pool).await;
        assert_eq!(lab.id, "lab1");
        assert_eq!(lab.status, LabStatus::Scheduled);
        assert!(lab.report_data.is_none());
    }

    #[tokio::test]
    async fn test_status_only_changes_from_scheduled() {
        let pool = hms_store::in_memory();
        let lab = scheduled(&pool).await;

        let cancelled = update_lab_status(&pool, &lab.id, LabStatus::Cancelled).await.unwrap();
        assert_eq!(cancelled.status, LabStatus::Cancelled);
        assert!(matches!(
            update_lab_status(&pool, &lab.id, LabStatus::Completed).await,
            Err(HmsError::InvalidStateTransition { .. })
        ));

        let counts = lab_status_counts(&pool).await.unwrap();
        assert_eq!(counts.get(LabStatus::Cancelled), 1);
        assert_eq!(counts.get(LabStatus::Scheduled), 0);
    }

    #[tokio::test]
    async fn test_draft_sources() {
        let pool = hms_store::in_memory();
        let lab = scheduled(&pool).await;

        let blank = draft_report(&pool, &lab.id, None).await.unwrap();
        assert_eq!(blank, LabReport::blank());

        let failing = FixedGenerator(None);
        let fallback = draft_report(&pool, &lab.id, Some(&failing)).await.unwrap();
        assert_eq!(fallback, LabReport::blank());

        let generator = FixedGenerator(Some(cbc_report()));
        let drafted = draft_report(&pool, &lab.id, Some(&generator)).await.unwrap();
        assert_eq!(drafted, cbc_report());
    }

    #[tokio::test]
    async fn test_save_report_completes_and_is_reused() {
        let pool = hms_store::in_memory();
        let lab = scheduled(&pool).await;

        assert!(matches!(
            save_report(&pool, &lab.id, &LabReport::blank()).await,
            Err(HmsError::ValidationError(_))
        ));

        let saved = save_report(&pool, &lab.id, &cbc_report()).await.unwrap();
        assert_eq!(saved.status, LabStatus::Completed);
        assert_eq!(saved.report_data, Some(cbc_report()));

        let other = FixedGenerator(None);
        let draft = draft_report(&pool, &lab.id, Some(&other)).await.unwrap();
        assert_eq!(draft, cbc_report());
    }

    #[tokio::test]
    async fn test_cancelled_cannot_be_reported() {
        let pool = hms_store::in_memory();
        let lab = scheduled(&pool).await;
        update_lab_status(&pool, &lab.id, LabStatus::Cancelled).await.unwrap();

        assert!(draft_report(&pool, &lab.id, None).await.is_err());
        assert!(matches!(
            save_report(&pool, &lab.id, &cbc_report()).await,
            Err(HmsError::InvalidStateTransition { .. })
        ));
    }
}
