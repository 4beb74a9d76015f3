//! Ollama HTTP client for structured generation.
//!
//! Uses the Ollama API at /api/generate with a JSON schema in `format`, so
//! the model is constrained to emit a document of that shape.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use hms_core::config::{DEFAULT_GEN_MODEL, DEFAULT_OLLAMA_URL};

/// Ollama generation client.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    format: &'a serde_json::Value,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a client with an HTTP timeout.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }

    /// Create a client from the generator section of the configuration.
    pub fn from_config(config: &hms_core::config::GeneratorConfig) -> Self {
        Self::new(&config.base_url, &config.model, Duration::from_secs(config.timeout_secs))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a JSON document matching `schema`. Returns the raw `response` text.
    pub async fn generate_structured(&self, prompt: &str, schema: &serde_json::Value) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            format: schema,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to connect to Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama API error ({}): {}", status, body);
        }

        let result: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        debug!(model = %self.model, chars = result.response.len(), "Generated structured output");

        Ok(result.response)
    }

    /// Check if the Ollama service is healthy and the model is available.
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let text = resp.text().await.unwrap_or_default();
                Ok(text.contains(&self.model))
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OllamaClient {
        OllamaClient::new(&server.uri(), "llama3.2", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_generate_sends_schema_without_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.2",
                "stream": false,
                "format": {"type": "object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "llama3.2",
                "response": "{\"ok\":true}",
                "done": true
            })))
            .mount(&server)
            .await;

        let text = client(&server)
            .generate_structured("hi", &serde_json::json!({"type": "object"}))
            .await
            .unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_generate_reports_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_structured("hi", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model crashed"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "llama3.2:latest"}]
            })))
            .mount(&server)
            .await;

        assert!(client(&server).health_check().await.unwrap());

        let other = OllamaClient::new(&server.uri(), "mistral", Duration::from_secs(5));
        assert!(!other.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let offline = OllamaClient::new("http://127.0.0.1:9", "llama3.2", Duration::from_secs(1));
        assert!(!offline.health_check().await.unwrap());
    }
}
