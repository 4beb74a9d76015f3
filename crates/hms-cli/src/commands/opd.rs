//! OPD desk commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use hms_core::labels::{Department, Gender};
use hms_core::opd::{self, model::{OpdForm, OpdPaymentStatus, VisitType}};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum OpdCommands {
    /// Register a visit for today
    Register(RegisterArgs),

    /// List registrations, newest first
    List,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub patient_name: String,

    #[arg(long)]
    pub age: u32,

    #[arg(long)]
    pub gender: String,

    #[arg(long)]
    pub contact: String,

    /// e.g. "11:30 AM"
    #[arg(long)]
    pub time: String,

    #[arg(long)]
    pub department: String,

    /// Doctor ID
    #[arg(long)]
    pub doctor: String,

    #[arg(long)]
    pub reason: String,

    /// New, Follow-up or Referral
    #[arg(long, default_value = "New")]
    pub visit_type: String,

    #[arg(long, default_value = "1000")]
    pub fees: f64,

    /// Paid or Pending
    #[arg(long, default_value = "Pending")]
    pub payment: String,
}

pub async fn execute(cmd: OpdCommands, ctx: &Context) -> Result<()> {
    match cmd {
        OpdCommands::Register(args) => {
            let form = OpdForm {
                patient_name: args.patient_name,
                age: args.age,
                gender: Gender::parse_input(&args.gender)?,
                contact: args.contact,
                time: args.time,
                department: Department::parse_input(&args.department)?,
                doctor_id: args.doctor,
                reason: args.reason,
                visit_type: VisitType::parse_input(&args.visit_type)?,
                fees: args.fees,
                payment_status: OpdPaymentStatus::parse_input(&args.payment)?,
            };
            let registration = opd::register_opd(&ctx.pool, form).await?;

            println!(
                "{} Registered {} as {}",
                "✓".green().bold(),
                registration.patient_name.cyan(),
                registration.opd_number().bold()
            );
        }

        OpdCommands::List => {
            let registrations = opd::list_registrations(&ctx.pool).await?;
            output::print_opd_table(&registrations);
        }
    }

    Ok(())
}
