//! Lab report values and the generation seam.
//!
//! A report is a list of analyte rows plus a free-text interpretation. The
//! value type tolerates incomplete content while it is being edited;
//! [`LabReport::validate_complete`] decides whether it may be saved.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{HmsError, HmsResult};

/// One measured analyte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyteResult {
    /// Name of the analyte, e.g. "Hemoglobin".
    pub analyte: String,
    /// Measured value with units, e.g. "14.5 g/dL".
    pub result: String,
    /// Normal range with units, e.g. "13.5-17.5 g/dL".
    pub reference_range: String,
}

/// Columns of an analyte row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyteField {
    Analyte,
    Result,
    ReferenceRange,
}

/// A lab report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    /// Analyte results, one entry per measured parameter.
    pub results: Vec<AnalyteResult>,
    /// Brief overall interpretation of the results.
    pub interpretation: String,
}

impl LabReport {
    /// An empty report with a single blank row, ready for manual entry.
    pub fn blank() -> Self {
        Self {
            results: vec![AnalyteResult::default()],
            interpretation: String::new(),
        }
    }

    pub fn add_row(&mut self) {
        self.results.push(AnalyteResult::default());
    }

    /// Remove a row. The last remaining row is never removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.results.len() <= 1 || index >= self.results.len() {
            return false;
        }
        self.results.remove(index);
        true
    }

    /// Set one cell of the results table.
    pub fn set_field(&mut self, index: usize, field: AnalyteField, value: impl Into<String>) -> HmsResult<()> {
        let row = self
            .results
            .get_mut(index)
            .ok_or_else(|| HmsError::validation(format!("No result row {}", index + 1)))?;
        let value = value.into();
        match field {
            AnalyteField::Analyte => row.analyte = value,
            AnalyteField::Result => row.result = value,
            AnalyteField::ReferenceRange => row.reference_range = value,
        }
        Ok(())
    }

    /// Check the report can be saved: at least one row, no blank cell, an interpretation.
    pub fn validate_complete(&self) -> HmsResult<()> {
        if self.results.is_empty() {
            return Err(HmsError::validation("Report must contain at least one result"));
        }
        let incomplete = self.results.iter().any(|r| {
            r.analyte.trim().is_empty() || r.result.trim().is_empty() || r.reference_range.trim().is_empty()
        });
        if incomplete || self.interpretation.trim().is_empty() {
            return Err(HmsError::validation(
                "Please fill in all analyte fields and the interpretation",
            ));
        }
        Ok(())
    }
}

/// Request to generate a report for one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestRequest {
    pub test_name: String,
}

impl LabTestRequest {
    pub fn new(test_name: &str) -> HmsResult<Self> {
        let test_name = test_name.trim();
        if test_name.is_empty() {
            return Err(HmsError::validation("Test name is required"));
        }
        Ok(Self {
            test_name: test_name.to_string(),
        })
    }
}

/// The only way generation fails. The reason is for logs, not for users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to generate lab report: {reason}")]
pub struct GenerationFailure {
    pub reason: String,
}

impl GenerationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Message shown to users when generation fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate lab report.";

/// Produces plausible reports for a named test.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate_lab_report(&self, request: &LabTestRequest) -> Result<LabReport, GenerationFailure>;
}
