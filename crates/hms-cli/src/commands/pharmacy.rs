//! Pharmacy commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use hms_core::pharmacy::{self, model::NewPrescription};

use super::{confirm, Context};
use crate::output;

#[derive(Subcommand)]
pub enum PharmacyCommands {
    /// List prescriptions
    List,

    /// Write a prescription
    Prescribe {
        /// Patient ID
        #[arg(long)]
        patient: String,

        #[arg(long)]
        medication: String,

        /// e.g. "500mg twice daily"
        #[arg(long)]
        dosage: String,
    },

    /// Dispense a pending prescription
    Fill {
        /// Prescription ID (e.g. rx1)
        id: String,
    },

    /// Return a filled prescription to the pending queue
    Reopen {
        id: String,
    },

    /// Cancel a pending prescription
    Cancel {
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn execute(cmd: PharmacyCommands, ctx: &Context) -> Result<()> {
    let pool = &ctx.pool;

    match cmd {
        PharmacyCommands::List => {
            let all = pharmacy::list_prescriptions(pool).await?;
            output::print_prescriptions_table(&all);
            output::print_counts(&pharmacy::model::status_counts(&all));
        }

        PharmacyCommands::Prescribe { patient, medication, dosage } => {
            let rx = pharmacy::create_prescription(pool, NewPrescription {
                patient_id: patient,
                medication,
                dosage,
            })
            .await?;
            println!(
                "{} Prescribed {} ({})",
                "✓".green().bold(),
                rx.medication.cyan(),
                rx.id.dimmed()
            );
        }

        PharmacyCommands::Fill { id } => {
            let rx = pharmacy::fill_prescription(pool, &id).await?;
            println!("{} Filled {} ({})", "✓".green().bold(), rx.medication.cyan(), rx.id.dimmed());
        }

        PharmacyCommands::Reopen { id } => {
            let rx = pharmacy::reopen_prescription(pool, &id).await?;
            println!("{} {} is pending again ({})", "✓".green().bold(), rx.medication.cyan(), rx.id.dimmed());
        }

        PharmacyCommands::Cancel { id, yes } => {
            let rx = pharmacy::get_prescription(pool, &id).await?;
            if !confirm(&format!("Cancel prescription for {}?", rx.medication), yes)? {
                println!("{}", "Nothing changed.".dimmed());
                return Ok(());
            }
            let rx = pharmacy::cancel_prescription(pool, &id).await?;
            println!("{} Cancelled {}", "✓".green().bold(), rx.id.dimmed());
        }
    }

    Ok(())
}
