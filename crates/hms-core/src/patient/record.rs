//! Medical records kept in a patient's history.

use chrono::NaiveDate;
use hms_store::records::MedicalRecordRow;
use serde::{Deserialize, Serialize};

use crate::error::HmsResult;
use crate::labels::labeled_enum;
use crate::validation;

labeled_enum! {
    /// Free-text note or attached report.
    RecordType, "record type" {
        Note => "Note",
        Report => "Report",
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::Note
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl MedicalRecord {
    pub fn from_row(row: MedicalRecordRow) -> HmsResult<Self> {
        Ok(Self {
            date: validation::stored_date(&row.date)?,
            record_type: RecordType::from_stored(&row.record_type)?,
            id: row.id,
            patient_id: row.patient_id,
            title: row.title,
            content: row.content,
            file_url: row.file_url,
        })
    }
}

/// Input for adding a record. The patient comes from the request path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalRecord {
    #[serde(default, rename = "type")]
    pub record_type: RecordType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub file_url: Option<String>,
}
