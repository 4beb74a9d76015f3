//! Appointment commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use hms_core::appointment::{
    self,
    model::{AppointmentFilter, AppointmentForm, AppointmentMode, AppointmentStatus, Gender, PaymentStatus},
};
use hms_core::validation;

use super::{confirm, Context};
use crate::output;

#[derive(Subcommand)]
pub enum AppointmentCommands {
    /// Book a patient with a doctor
    Schedule(ScheduleArgs),

    /// List appointments
    List {
        /// Only this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Only this status
        #[arg(long)]
        status: Option<String>,

        /// Patient name fragment
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Cancel an appointment
    Cancel {
        /// Appointment ID (e.g. apt1)
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark an appointment as completed
    Complete {
        /// Appointment ID
        id: String,
    },
}

#[derive(Args)]
pub struct ScheduleArgs {
    /// Patient's full name
    pub patient_name: String,

    #[arg(long)]
    pub age: u32,

    /// Male, Female or Other
    #[arg(long)]
    pub gender: String,

    #[arg(long)]
    pub contact: String,

    /// Doctor ID
    #[arg(long)]
    pub doctor: String,

    /// YYYY-MM-DD, today or later
    #[arg(long)]
    pub date: String,

    /// e.g. "10:00 AM"
    #[arg(long)]
    pub time: String,

    #[arg(long)]
    pub reason: String,

    /// In-person, Online or Telephonic
    #[arg(long, default_value = "In-person")]
    pub mode: String,

    /// Minutes
    #[arg(long, default_value = "30")]
    pub duration: u32,

    #[arg(long, default_value = "500")]
    pub fees: f64,

    /// Paid, Pending or Partially Paid
    #[arg(long, default_value = "Pending")]
    pub payment: String,
}

pub async fn execute(cmd: AppointmentCommands, ctx: &Context) -> Result<()> {
    let pool = &ctx.pool;

    match cmd {
        AppointmentCommands::Schedule(args) => {
            let form = AppointmentForm {
                patient_name: args.patient_name,
                patient_age: args.age,
                patient_gender: Gender::parse_input(&args.gender)?,
                patient_contact: args.contact,
                doctor_id: args.doctor,
                date: validation::parse_date(&args.date)?,
                time: args.time,
                reason: args.reason,
                mode: AppointmentMode::parse_input(&args.mode)?,
                duration: args.duration,
                fees: args.fees,
                status: AppointmentStatus::Confirmed,
                payment_status: PaymentStatus::parse_input(&args.payment)?,
            };
            let appt = appointment::schedule_appointment(pool, form).await?;

            println!(
                "{} Scheduled {} for {} at {} ({})",
                "✓".green().bold(),
                appt.patient_name.cyan(),
                appt.date,
                appt.time,
                appt.id.dimmed()
            );
        }

        AppointmentCommands::List { date, status, search } => {
            let filter = AppointmentFilter {
                date: date.as_deref().map(validation::parse_date).transpose()?,
                status: status.as_deref().map(AppointmentStatus::parse_input).transpose()?,
                search,
            };
            let appointments = appointment::filter_appointments(pool, &filter).await?;
            output::print_appointments_table(&appointments);
        }

        AppointmentCommands::Cancel { id, yes } => {
            let appt = appointment::get_appointment(pool, &id).await?;
            let prompt = format!("Cancel {}'s appointment on {}?", appt.patient_name, appt.date);
            if !confirm(&prompt, yes)? {
                println!("{}", "Nothing changed.".dimmed());
                return Ok(());
            }
            let appt = appointment::cancel_appointment(pool, &id).await?;
            println!("{} Cancelled {}", "✓".green().bold(), appt.id.dimmed());
        }

        AppointmentCommands::Complete { id } => {
            let appt = appointment::complete_appointment(pool, &id).await?;
            println!(
                "{} Completed {}'s appointment ({})",
                "✓".green().bold(),
                appt.patient_name.cyan(),
                appt.id.dimmed()
            );
        }
    }

    Ok(())
}
