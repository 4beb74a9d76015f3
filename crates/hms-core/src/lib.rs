//! HMS Core Library
//!
//! Domain models and commands for the hospital management service. Every
//! command validates its input, reads and writes through an
//! [`hms_store::StorePool`], and returns a typed entity or an [`HmsError`].

pub mod appointment;
pub mod billing;
pub mod config;
pub mod doctor;
pub mod error;
pub mod lab;
pub mod labels;
pub mod opd;
pub mod patient;
pub mod pharmacy;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use config::HmsConfig;
pub use error::{HmsError, HmsResult};
