//! Laboratory commands.

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use hms_ai::{LabReportGenerator, OllamaClient};
use hms_core::lab::{
    self,
    model::NewLabAppointment,
    report::{LabReport, LabTestRequest, ReportGenerator, GENERATION_FAILED_MESSAGE},
};
use hms_core::validation;
use indicatif::{ProgressBar, ProgressStyle};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum LabCommands {
    /// Schedule a lab test
    Schedule {
        /// Patient ID
        #[arg(long)]
        patient: String,

        /// e.g. "Complete Blood Count"
        #[arg(long)]
        test: String,

        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List lab appointments with status counts
    List,

    /// Generate a sample report for a test name
    Generate {
        /// e.g. "Lipid Profile"
        test_name: String,
    },

    /// Draft a report for an appointment and save it as completed
    Complete {
        /// Lab appointment ID (e.g. lab1)
        id: String,
    },
}

fn generator(ctx: &Context) -> LabReportGenerator {
    LabReportGenerator::new(OllamaClient::from_config(&ctx.config.generator))
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn execute(cmd: LabCommands, ctx: &Context) -> Result<()> {
    let pool = &ctx.pool;

    match cmd {
        LabCommands::Schedule { patient, test, date } => {
            let date = match date {
                Some(d) => validation::parse_date(&d)?,
                None => validation::today(),
            };
            let lab = lab::schedule_lab_test(pool, NewLabAppointment {
                patient_id: patient,
                test_name: test,
                date,
            })
            .await?;

            println!(
                "{} Scheduled {} on {} ({})",
                "✓".green().bold(),
                lab.test_name.cyan(),
                lab.date,
                lab.id.dimmed()
            );
        }

        LabCommands::List => {
            let labs = lab::list_lab_appointments(pool).await?;
            let counts = lab::lab_status_counts(pool).await?;
            output::print_lab_table(&labs);
            output::print_counts(&counts.0);
        }

        LabCommands::Generate { test_name } => {
            let request = LabTestRequest::new(&test_name)?;
            let pb = spinner(format!("Generating {} report...", request.test_name));
            let result = generator(ctx).generate_lab_report(&request).await;
            pb.finish_and_clear();

            match result {
                Ok(report) => output::print_lab_report(&request.test_name, &report),
                Err(e) => {
                    tracing::debug!(reason = %e.reason, "Generation failed");
                    anyhow::bail!(GENERATION_FAILED_MESSAGE);
                }
            }
        }

        LabCommands::Complete { id } => {
            let appt = lab::get_lab_appointment(pool, &id).await?;
            let pb = spinner(format!("Preparing {} report...", appt.test_name));
            let generator = generator(ctx);
            let draft = lab::draft_report(pool, &id, Some(&generator as &dyn ReportGenerator)).await;
            pb.finish_and_clear();

            let report: LabReport = draft?;
            if let Err(e) = report.validate_complete() {
                anyhow::bail!("{}. Enter the results through the API and save them there.", e);
            }
            let saved = lab::save_report(pool, &id, &report).await?;

            output::print_lab_report(&saved.test_name, &report);
            println!();
            println!("{} {} completed", "✓".green().bold(), saved.id.cyan());
        }
    }

    Ok(())
}
