//! HMS AI
//!
//! Structured lab report generation through a local Ollama server.

pub mod lab_report;
pub mod ollama;

pub use lab_report::LabReportGenerator;
pub use ollama::OllamaClient;
