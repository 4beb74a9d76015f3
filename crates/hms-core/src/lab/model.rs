//! Lab appointment models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hms_store::lab::LabAppointmentRow;
use serde::{Deserialize, Serialize};

use super::report::LabReport;
use crate::error::{HmsError, HmsResult};
use crate::labels::labeled_enum;
use crate::validation;

labeled_enum! {
    /// Lab appointment lifecycle state.
    LabStatus, "lab status" {
        Scheduled => "Scheduled",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

/// A scheduled lab test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabAppointment {
    pub id: String,
    pub patient_id: String,
    pub test_name: String,
    pub date: NaiveDate,
    pub status: LabStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_data: Option<LabReport>,
}

impl LabAppointment {
    /// Create a LabAppointment from a stored row.
    pub fn from_row(row: LabAppointmentRow) -> HmsResult<Self> {
        let report_data = match row.report.as_deref() {
            Some(json) => Some(
                serde_json::from_str(json)
                    .map_err(|e| HmsError::CorruptRecord(format!("lab report for {}: {}", row.id, e)))?,
            ),
            None => None,
        };
        Ok(Self {
            date: validation::stored_date(&row.date)?,
            status: LabStatus::from_stored(&row.status)?,
            id: row.id,
            patient_id: row.patient_id,
            test_name: row.test_name,
            report_data,
        })
    }
}

/// Input for scheduling a lab test.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabAppointment {
    pub patient_id: String,
    pub test_name: String,
    pub date: NaiveDate,
}

/// Count of lab appointments per status. Every status is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabStatusCounts(pub BTreeMap<String, usize>);

impl LabStatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a LabStatus>) -> Self {
        let mut counts: BTreeMap<String, usize> =
            LabStatus::ALL.iter().map(|s| (s.as_str().to_string(), 0)).collect();
        for status in statuses {
            *counts.entry(status.as_str().to_string()).or_default() += 1;
        }
        Self(counts)
    }

    pub fn get(&self, status: LabStatus) -> usize {
        self.0.get(status.as_str()).copied().unwrap_or(0)
    }
}
