//! Lab report generation.
//!
//! The prompt asks for a fictional report with normal findings; the JSON
//! schema derived from [`LabReport`] constrains the output shape. Whatever the
//! backend returns is parsed and checked before it is handed back.

use async_trait::async_trait;
use hms_core::lab::report::{GenerationFailure, LabReport, LabTestRequest, ReportGenerator};
use schemars::gen::SchemaSettings;
use tracing::{error, info};

use crate::ollama::OllamaClient;

const PROMPT_TEMPLATE: &str = "You are a medical laboratory AI. Your task is to generate a plausible, but fictional, lab report for a given test name.

Generate a set of typical results for the following test: {test_name}

Include a list of analytes, their results, and their normal reference ranges.
Also provide a brief interpretation of the results. The results should appear normal and not indicate any disease or abnormality.

Respond with JSON only.";

pub fn render_prompt(request: &LabTestRequest) -> String {
    PROMPT_TEMPLATE.replace("{test_name}", &request.test_name)
}

/// JSON schema of [`LabReport`], passed to the backend as the output format.
///
/// Subschemas are inlined; Ollama does not resolve `$ref`.
pub fn report_schema() -> serde_json::Value {
    let schema = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<LabReport>();
    serde_json::to_value(schema).unwrap_or_default()
}

/// Parse backend output into a complete report.
///
/// Fails on malformed JSON, a missing field, an empty results list or any
/// blank value.
pub fn parse_report(raw: &str) -> Result<LabReport, GenerationFailure> {
    let report: LabReport = serde_json::from_str(raw.trim())
        .map_err(|e| GenerationFailure::new(format!("malformed output: {}", e)))?;
    report
        .validate_complete()
        .map_err(|e| GenerationFailure::new(format!("incomplete report: {}", e)))?;
    Ok(report)
}

/// [`ReportGenerator`] backed by Ollama.
pub struct LabReportGenerator {
    client: OllamaClient,
    schema: serde_json::Value,
}

impl LabReportGenerator {
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            schema: report_schema(),
        }
    }
}

#[async_trait]
impl ReportGenerator for LabReportGenerator {
    async fn generate_lab_report(&self, request: &LabTestRequest) -> Result<LabReport, GenerationFailure> {
        let prompt = render_prompt(request);
        let outcome = match self.client.generate_structured(&prompt, &self.schema).await {
            Ok(raw) => parse_report(&raw),
            Err(e) => Err(GenerationFailure::new(format!("{:#}", e))),
        };

        match &outcome {
            Ok(report) => info!(
                test = %request.test_name,
                model = %self.client.model(),
                analytes = report.results.len(),
                "Generated lab report"
            ),
            Err(e) => error!(test = %request.test_name, reason = %e.reason, "Lab report generation failed"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LIPID_PROFILE: &str = r#"{
        "results": [
            {"analyte": "Total Cholesterol", "result": "180 mg/dL", "referenceRange": "<200 mg/dL"},
            {"analyte": "HDL Cholesterol", "result": "55 mg/dL", "referenceRange": ">40 mg/dL"},
            {"analyte": "Triglycerides", "result": "120 mg/dL", "referenceRange": "<150 mg/dL"}
        ],
        "interpretation": "Lipid levels are within normal limits."
    }"#;

    fn request() -> LabTestRequest {
        LabTestRequest::new("Lipid Profile").unwrap()
    }

    async fn generator_returning(template: ResponseTemplate) -> (MockServer, LabReportGenerator) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(template)
            .mount(&server)
            .await;
        let client = OllamaClient::new(&server.uri(), "llama3.2", Duration::from_secs(5));
        (server, LabReportGenerator::new(client))
    }

    fn ollama_body(response: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3.2",
            "response": response,
            "done": true
        }))
    }

    #[test]
    fn test_prompt_names_the_test() {
        let prompt = render_prompt(&request());
        assert!(prompt.contains("following test: Lipid Profile"));
        assert!(prompt.contains("appear normal"));
    }

    #[test]
    fn test_schema_describes_report_shape() {
        let schema = report_schema();
        assert!(schema["properties"]["results"].is_object());
        assert!(schema["properties"]["interpretation"].is_object());
        let row = &schema["properties"]["results"]["items"];
        assert!(row["properties"]["referenceRange"].is_object());
        assert!(!schema.to_string().contains("$ref"));
    }

    #[test]
    fn test_parse_valid_report() {
        let report = parse_report(LIPID_PROFILE).unwrap();
        assert!(!report.results.is_empty());
        for row in &report.results {
            assert!(!row.analyte.is_empty());
            assert!(!row.result.is_empty());
            assert!(!row.reference_range.is_empty());
        }
        assert!(!report.interpretation.is_empty());
        assert_eq!(report.results[0].analyte, "Total Cholesterol");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        let cases = [
            "not json",
            r#"{"results": [{"analyte": "LDL", "result": "90 mg/dL"}], "interpretation": "ok"}"#,
            r#"{"results": [], "interpretation": "ok"}"#,
            r#"{"results": [{"analyte": "LDL", "result": "", "referenceRange": "<100"}], "interpretation": "ok"}"#,
            r#"{"results": [{"analyte": "LDL", "result": "90", "referenceRange": "<100"}], "interpretation": " "}"#,
        ];
        for raw in cases {
            assert!(parse_report(raw).is_err(), "accepted {}", raw);
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let (_server, generator) = generator_returning(ollama_body(LIPID_PROFILE)).await;
        let report = generator.generate_lab_report(&request()).await.unwrap();
        assert!(!report.results.is_empty());
        assert!(!report.interpretation.is_empty());
    }

    #[tokio::test]
    async fn test_generate_missing_reference_range_fails_whole_report() {
        let partial = r#"{"results": [
            {"analyte": "Total Cholesterol", "result": "180 mg/dL", "referenceRange": "<200 mg/dL"},
            {"analyte": "LDL", "result": "100 mg/dL"}
        ], "interpretation": "Normal"}"#;
        let (_server, generator) = generator_returning(ollama_body(partial)).await;
        assert!(generator.generate_lab_report(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_generate_backend_error() {
        let (_server, generator) = generator_returning(ResponseTemplate::new(500).set_body_string("boom")).await;
        let failure = generator.generate_lab_report(&request()).await.unwrap_err();
        assert!(failure.reason.contains("500"));
    }

    #[tokio::test]
    async fn test_generate_unreachable_backend() {
        let client = OllamaClient::new("http://127.0.0.1:9", "llama3.2", Duration::from_secs(1));
        let generator = LabReportGenerator::new(client);
        assert!(generator.generate_lab_report(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_generate_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ollama_body(LIPID_PROFILE).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;
        let client = OllamaClient::new(&server.uri(), "llama3.2", Duration::from_millis(300));
        let generator = LabReportGenerator::new(client);

        let failure = generator.generate_lab_report(&request()).await.unwrap_err();
        assert!(failure.reason.contains("timed out"), "reason: {}", failure.reason);
    }
}
