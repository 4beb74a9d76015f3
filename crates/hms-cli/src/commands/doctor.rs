//! Doctor commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use hms_core::doctor::{self, model::{Department, DoctorStatus, NewDoctor}};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum DoctorCommands {
    /// Add a doctor to the master list
    Add(AddArgs),

    /// List doctors
    List {
        /// Only this department
        #[arg(short, long)]
        department: Option<String>,
    },

    /// Change a doctor's status
    Status {
        /// Doctor ID (e.g. doc1)
        id: String,

        /// Active, Inactive or On Leave
        status: String,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Full name
    pub name: String,

    /// Cardiology, Neurology, Pediatrics, Orthopedics or General
    #[arg(long)]
    pub department: String,

    /// e.g. "MBBS, MD"
    #[arg(long)]
    pub qualification: String,

    /// Years of practice
    #[arg(long, default_value = "5")]
    pub experience: u32,

    /// Comma-separated, e.g. "English, Hindi"
    #[arg(long)]
    pub languages: String,

    #[arg(long)]
    pub email: String,
}

pub async fn execute(cmd: DoctorCommands, ctx: &Context) -> Result<()> {
    let pool = &ctx.pool;

    match cmd {
        DoctorCommands::Add(args) => {
            let input = NewDoctor {
                name: args.name,
                department: Department::parse_input(&args.department)?,
                qualification: args.qualification,
                experience: args.experience,
                languages: args.languages,
                email: args.email,
                status: None,
            };
            let doctor = doctor::add_doctor(pool, input).await?;

            println!(
                "{} Added {} to {} ({})",
                "✓".green().bold(),
                doctor.name.cyan(),
                doctor.department,
                doctor.id.dimmed()
            );
        }

        DoctorCommands::List { department } => {
            let doctors = match department {
                Some(d) => doctor::list_doctors_by_department(pool, Department::parse_input(&d)?).await?,
                None => doctor::list_doctors(pool).await?,
            };
            output::print_doctors_table(&doctors);
        }

        DoctorCommands::Status { id, status } => {
            let status = DoctorStatus::parse_input(&status)?;
            let doctor = doctor::update_doctor_status(pool, &id, status).await?;
            println!(
                "{} {} is now {}",
                "✓".green().bold(),
                doctor.name.cyan(),
                doctor.status.to_string().yellow()
            );
        }
    }

    Ok(())
}
