//! Service configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HmsError, HmsResult};

/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmsConfig {
    pub store: StoreConfig,
    pub generator: GeneratorConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis URL. Unset means a volatile in-memory store.
    pub redis_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    /// HTTP timeout applied by the transport, in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_GEN_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

impl HmsConfig {
    /// Load configuration. A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> HmsResult<Self> {
        let mut config = match path {
            Some(p) if p.exists() => {
                debug!(path = %p.display(), "Loading configuration file");
                let text = std::fs::read_to_string(p)?;
                Self::from_toml_str(&text)?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> HmsResult<Self> {
        toml::from_str(text).map_err(|e| HmsError::config(e.to_string()))
    }

    /// Apply `REDIS_URL`, `OLLAMA_URL`, `OLLAMA_GEN_MODEL` and `HMS_PORT`.
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> HmsResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REDIS_URL").filter(|v| !v.is_empty()) {
            self.store.redis_url = Some(url);
        }
        if let Some(url) = lookup("OLLAMA_URL").filter(|v| !v.is_empty()) {
            self.generator.base_url = url;
        }
        if let Some(model) = lookup("OLLAMA_GEN_MODEL").filter(|v| !v.is_empty()) {
            self.generator.model = model;
        }
        if let Some(port) = lookup("HMS_PORT").filter(|v| !v.is_empty()) {
            self.web.port = port
                .parse()
                .map_err(|_| HmsError::config(format!("HMS_PORT must be a port number, got '{}'", port)))?;
        }
        Ok(())
    }
}
