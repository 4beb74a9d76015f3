//! Patient registry commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use hms_core::patient::{
    self,
    model::{Gender, NewPatient, PatientStatus},
    record::{NewMedicalRecord, RecordType},
};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum PatientCommands {
    /// Register a patient under a doctor
    Register(RegisterArgs),

    /// List patients
    List {
        /// Filter by name fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Only patients under this doctor
        #[arg(long)]
        doctor: Option<String>,
    },

    /// Show one patient
    Show {
        /// Patient ID (e.g. pat1)
        id: String,
    },

    /// Change a patient's status
    Status {
        /// Patient ID
        id: String,

        /// Admitted, Under Observation or Discharged
        status: String,
    },

    /// Show a patient's medical records, newest first
    Records {
        /// Patient ID
        id: String,
    },

    /// Add a note or report to a patient's records
    AddRecord {
        /// Patient ID
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// Note or Report
        #[arg(long = "type", default_value = "Note")]
        record_type: String,

        /// Link to an attached file
        #[arg(long)]
        file_url: Option<String>,
    },
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Full name
    pub name: String,

    #[arg(long)]
    pub age: u32,

    /// Male, Female or Other
    #[arg(long)]
    pub gender: String,

    /// Contact number, at least 10 digits
    #[arg(long)]
    pub contact: String,

    #[arg(long, default_value = "")]
    pub address: String,

    /// Attending doctor ID
    #[arg(long)]
    pub doctor: String,

    /// Initial status (defaults to Admitted)
    #[arg(long)]
    pub status: Option<String>,
}

pub async fn execute(cmd: PatientCommands, ctx: &Context) -> Result<()> {
    let pool = &ctx.pool;

    match cmd {
        PatientCommands::Register(args) => {
            let input = NewPatient {
                name: args.name,
                age: args.age,
                gender: Gender::parse_input(&args.gender)?,
                contact: args.contact,
                address: args.address,
                status: args.status.as_deref().map(PatientStatus::parse_input).transpose()?,
                doctor_id: args.doctor,
            };
            let patient = patient::register_patient(pool, input).await?;

            println!(
                "{} Registered patient: {} ({})",
                "✓".green().bold(),
                patient.name.cyan(),
                patient.id.dimmed()
            );
        }

        PatientCommands::List { search, doctor } => {
            let patients = match (search, doctor) {
                (Some(q), _) => patient::search_patients(pool, &q).await?,
                (None, Some(d)) => patient::list_patients_for_doctor(pool, &d).await?,
                (None, None) => patient::list_patients(pool).await?,
            };
            output::print_patients_table(&patients);
        }

        PatientCommands::Show { id } => {
            let patient = patient::get_patient(pool, &id).await?;
            output::print_patient(&patient);
        }

        PatientCommands::Status { id, status } => {
            let status = PatientStatus::parse_input(&status)?;
            let patient = patient::update_patient_status(pool, &id, status).await?;
            println!(
                "{} {} is now {}",
                "✓".green().bold(),
                patient.name.cyan(),
                output::patient_status(patient.status)
            );
        }

        PatientCommands::Records { id } => {
            let patient = patient::get_patient(pool, &id).await?;
            let records = patient::list_medical_records(pool, &patient.id).await?;
            output::print_medical_records(&patient.name, &records);
        }

        PatientCommands::AddRecord { id, title, content, record_type, file_url } => {
            let input = NewMedicalRecord {
                record_type: RecordType::parse_input(&record_type)?,
                title,
                content,
                file_url,
            };
            let record = patient::add_medical_record(pool, &id, input).await?;
            println!(
                "{} Added {} {} ({})",
                "✓".green().bold(),
                record.record_type.as_str().to_lowercase(),
                record.title.cyan(),
                record.id.dimmed()
            );
        }
    }

    Ok(())
}
