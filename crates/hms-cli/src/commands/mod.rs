//! CLI command definitions and handlers.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use hms_core::HmsConfig;
use hms_store::StorePool;
use std::path::PathBuf;

pub mod appointment;
pub mod billing;
pub mod doctor;
pub mod health;
pub mod lab;
pub mod opd;
pub mod patient;
pub mod pharmacy;
pub mod serve;
pub mod stats;

/// Hospital Management Service
#[derive(Parser)]
#[command(name = "hms")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, env = "HMS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),

    /// Patient registry
    #[command(subcommand)]
    Patient(patient::PatientCommands),

    /// Doctor master list
    #[command(subcommand)]
    Doctor(doctor::DoctorCommands),

    /// Appointment scheduling
    #[command(subcommand)]
    Appointment(appointment::AppointmentCommands),

    /// Outpatient department desk
    #[command(subcommand)]
    Opd(opd::OpdCommands),

    /// Bills and invoices
    #[command(subcommand)]
    Billing(billing::BillingCommands),

    /// Lab tests and reports
    #[command(subcommand)]
    Lab(lab::LabCommands),

    /// Prescriptions
    #[command(subcommand)]
    Pharmacy(pharmacy::PharmacyCommands),

    /// Dashboard statistics
    #[command(subcommand)]
    Stats(stats::StatsCommands),

    /// Check the store and the generation backend
    Health,
}

/// What every command runs against.
pub struct Context {
    pub config: HmsConfig,
    pub pool: StorePool,
}

/// `~/.config/hms/config.toml` or the platform equivalent.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hms").join("config.toml"))
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let path = self.config.or_else(default_config_path);
        let config = HmsConfig::load(path.as_deref()).context("Failed to load configuration")?;
        let pool = hms_store::open(config.store.redis_url.as_deref())
            .await
            .context("Failed to open store")?;
        let ctx = Context { config, pool };

        match self.command {
            Commands::Serve(args) => serve::execute(args, &ctx).await,
            Commands::Patient(cmd) => patient::execute(cmd, &ctx).await,
            Commands::Doctor(cmd) => doctor::execute(cmd, &ctx).await,
            Commands::Appointment(cmd) => appointment::execute(cmd, &ctx).await,
            Commands::Opd(cmd) => opd::execute(cmd, &ctx).await,
            Commands::Billing(cmd) => billing::execute(cmd, &ctx).await,
            Commands::Lab(cmd) => lab::execute(cmd, &ctx).await,
            Commands::Pharmacy(cmd) => pharmacy::execute(cmd, &ctx).await,
            Commands::Stats(cmd) => stats::execute(cmd, &ctx).await,
            Commands::Health => health::execute(&ctx).await,
        }
    }
}

/// Ask before a destructive change unless `--yes` was given.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["hms", "-v", "--config", "hms.toml", "stats", "dashboard"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("hms.toml")));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm("Cancel?", true).unwrap());
    }
}
