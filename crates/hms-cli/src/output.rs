//! Terminal output formatting.

use std::collections::BTreeMap;

use colored::{ColoredString, Colorize};
use hms_core::appointment::model::{Appointment, AppointmentStatus};
use hms_core::billing::model::{Billing, BillingStatus, Invoice};
use hms_core::doctor::model::{Doctor, DoctorStatus};
use hms_core::lab::model::{LabAppointment, LabStatus};
use hms_core::lab::report::LabReport;
use hms_core::opd::model::OpdRegistration;
use hms_core::patient::model::{Patient, PatientStatus};
use hms_core::patient::record::{MedicalRecord, RecordType};
use hms_core::pharmacy::model::{Prescription, PrescriptionStatus};
use hms_core::stats::model::{DailyStats, DashboardSummary};
use unicode_width::UnicodeWidthStr;

/// Format an amount of money.
pub fn money(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

pub fn patient_status(status: PatientStatus) -> ColoredString {
    match status {
        PatientStatus::Admitted => status.as_str().yellow(),
        PatientStatus::UnderObservation => status.as_str().cyan(),
        PatientStatus::Discharged => status.as_str().green(),
    }
}

fn doctor_status(status: DoctorStatus) -> ColoredString {
    match status {
        DoctorStatus::Active => status.as_str().green(),
        DoctorStatus::Inactive => status.as_str().dimmed(),
        DoctorStatus::OnLeave => status.as_str().yellow(),
    }
}

fn appointment_status(status: AppointmentStatus) -> ColoredString {
    match status {
        AppointmentStatus::Confirmed => status.as_str().green(),
        AppointmentStatus::Pending => status.as_str().yellow(),
        AppointmentStatus::Cancelled => status.as_str().red(),
        AppointmentStatus::Completed => status.as_str().blue(),
    }
}

fn bill_status(status: BillingStatus) -> ColoredString {
    match status {
        BillingStatus::Paid => status.as_str().green(),
        BillingStatus::Pending => status.as_str().yellow(),
        BillingStatus::Overdue => status.as_str().red().bold(),
    }
}

fn lab_status(status: LabStatus) -> ColoredString {
    match status {
        LabStatus::Scheduled => status.as_str().yellow(),
        LabStatus::Completed => status.as_str().green(),
        LabStatus::Cancelled => status.as_str().red(),
    }
}

fn prescription_status(status: PrescriptionStatus) -> ColoredString {
    match status {
        PrescriptionStatus::Pending => status.as_str().yellow(),
        PrescriptionStatus::Filled => status.as_str().green(),
        PrescriptionStatus::Cancelled => status.as_str().red(),
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Pad a colored string by its visible text, ignoring escape codes.
fn pad_colored(s: ColoredString, width: usize) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(&*s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Fit a cell to `width` columns.
fn cell(s: &str, width: usize) -> String {
    pad_right(&truncate_visual(s, width), width)
}

/// Width left for a free-text column after the fixed ones.
fn flexible_width(fixed: usize) -> usize {
    term_width().saturating_sub(fixed).clamp(12, 40)
}

fn rule(width: usize) {
    println!("{}", "─".repeat(width.min(term_width())).dimmed());
}

/// Print patients as a table.
pub fn print_patients_table(patients: &[Patient]) {
    if patients.is_empty() {
        println!("{}", "No patients found.".dimmed());
        return;
    }

    let name_w = flexible_width(60);
    println!(
        "{} {} {:<4} {:<7} {:<18} {:<8}",
        cell("ID", 8),
        cell("Name", name_w),
        "Age",
        "Gender",
        "Status",
        "Doctor"
    );
    rule(50 + name_w);

    for p in patients {
        println!(
            "{} {} {:<4} {:<7} {} {:<8}",
            cell(&p.id, 8).dimmed(),
            cell(&p.name, name_w),
            p.age,
            p.gender.as_str(),
            pad_colored(patient_status(p.status), 18),
            p.doctor_id
        );
    }

    println!();
    println!("{} patient(s) total", patients.len());
}

/// Print a single patient.
pub fn print_patient(patient: &Patient) {
    println!("{} {}", patient.name.cyan().bold(), format!("({})", patient.id).dimmed());
    println!();
    println!("{}: {}", "Status".bold(), patient_status(patient.status));
    println!("{}: {}", "Age".bold(), patient.age);
    println!("{}: {}", "Gender".bold(), patient.gender);
    println!("{}: {}", "Contact".bold(), patient.contact);
    if !patient.address.is_empty() {
        println!("{}: {}", "Address".bold(), patient.address);
    }
    println!("{}: {}", "Doctor".bold(), patient.doctor_id);
}

/// Print a patient's medical history.
pub fn print_medical_records(patient_name: &str, records: &[MedicalRecord]) {
    println!("{}", format!("{}'s medical records", patient_name).cyan().bold());
    println!();
    if records.is_empty() {
        println!("{}", "No medical records yet.".dimmed());
        return;
    }

    for r in records {
        let kind = match r.record_type {
            RecordType::Note => r.record_type.as_str().blue(),
            RecordType::Report => r.record_type.as_str().magenta(),
        };
        println!("{} {} {} {}", r.date, pad_colored(kind, 7), r.title.bold(), format!("({})", r.id).dimmed());
        println!("  {}", r.content);
        if let Some(url) = &r.file_url {
            println!("  {} {}", "File:".dimmed(), url);
        }
    }
}

/// Print doctors as a table.
pub fn print_doctors_table(doctors: &[Doctor]) {
    if doctors.is_empty() {
        println!("{}", "No doctors found.".dimmed());
        return;
    }

    let name_w = flexible_width(58);
    println!(
        "{} {} {:<12} {:<4} {:<10} {}",
        cell("ID", 6),
        cell("Name", name_w),
        "Department",
        "Exp",
        "Status",
        "Languages"
    );
    rule(58 + name_w);

    for d in doctors {
        println!(
            "{} {} {:<12} {:<4} {} {}",
            cell(&d.id, 6).dimmed(),
            cell(&d.name, name_w),
            d.department.as_str(),
            d.experience,
            pad_colored(doctor_status(d.status), 10),
            d.languages.join(", ").dimmed()
        );
    }
}

/// Print appointments as a table.
pub fn print_appointments_table(appointments: &[Appointment]) {
    if appointments.is_empty() {
        println!("{}", "No appointments found.".dimmed());
        return;
    }

    let name_w = flexible_width(62);
    println!(
        "{} {} {:<10} {:<8} {:<6} {:<10} {}",
        cell("ID", 6),
        cell("Patient", name_w),
        "Date",
        "Time",
        "Doctor",
        "Status",
        "Fees"
    );
    rule(62 + name_w);

    for a in appointments {
        println!(
            "{} {} {:<10} {:<8} {:<6} {} {}",
            cell(&a.id, 6).dimmed(),
            cell(&a.patient_name, name_w),
            a.date,
            a.time,
            a.doctor_id,
            pad_colored(appointment_status(a.status), 10),
            money(a.fees)
        );
    }

    println!();
    println!("{} appointment(s)", appointments.len());
}

/// Print OPD registrations.
pub fn print_opd_table(registrations: &[OpdRegistration]) {
    if registrations.is_empty() {
        println!("{}", "No OPD registrations yet.".dimmed());
        return;
    }

    let name_w = flexible_width(60);
    println!(
        "{:<8} {} {:<12} {:<9} {:<10} {}",
        "OPD No.",
        cell("Patient", name_w),
        "Department",
        "Visit",
        "Date",
        "Payment"
    );
    rule(60 + name_w);

    for r in registrations {
        println!(
            "{:<8} {} {:<12} {:<9} {:<10} {}",
            r.opd_number().bold(),
            cell(&r.patient_name, name_w),
            r.department.as_str(),
            r.visit_type.as_str(),
            r.date,
            r.payment_status
        );
    }
}

/// Print bills as a table.
pub fn print_bills_table(bills: &[Billing]) {
    if bills.is_empty() {
        println!("{}", "No bills found.".dimmed());
        return;
    }

    let service_w = flexible_width(56);
    println!(
        "{:<8} {:<8} {} {:<10} {:>12} {}",
        "ID",
        "Patient",
        cell("Service", service_w),
        "Date",
        "Amount",
        "Status"
    );
    rule(56 + service_w);

    for b in bills {
        println!(
            "{:<8} {:<8} {} {:<10} {:>12} {}",
            b.id.dimmed(),
            b.patient_id,
            cell(&b.service_type, service_w),
            b.date,
            money(b.amount),
            bill_status(b.status)
        );
    }

    println!();
    println!(
        "{} bill(s), {} collected",
        bills.len(),
        money(hms_core::billing::total_revenue(bills)).green()
    );
}

/// Print a printable invoice.
pub fn print_invoice(invoice: &Invoice) {
    let bill = &invoice.bill;
    println!("{} {}", "INVOICE".bold(), invoice.invoice_number.cyan().bold());
    println!("{}", format!("Date: {}", bill.date).dimmed());
    println!();
    println!("{}", "Billed to".bold());
    println!("  {}", invoice.patient.name);
    println!("  {}", invoice.patient.contact.dimmed());
    if !invoice.patient.address.is_empty() {
        println!("  {}", invoice.patient.address.dimmed());
    }
    println!();
    println!("{}", "Attending doctor".bold());
    println!("  {} ({})", invoice.doctor.name, invoice.doctor.department);
    println!();
    println!("{:<30} {:>12}", "Service", "Amount");
    rule(43);
    println!("{} {:>12}", cell(&bill.service_type, 30), money(bill.amount));
    rule(43);
    println!("{:<30} {:>12}", "Total".bold(), money(bill.amount).bold());
    println!();
    println!("{}: {}", "Status".bold(), bill_status(bill.status));
}

/// Print lab appointments as a table.
pub fn print_lab_table(labs: &[LabAppointment]) {
    if labs.is_empty() {
        println!("{}", "No lab appointments found.".dimmed());
        return;
    }

    let test_w = flexible_width(44);
    println!(
        "{:<6} {:<8} {} {:<10} {:<10} {}",
        "ID",
        "Patient",
        cell("Test", test_w),
        "Date",
        "Status",
        "Report"
    );
    rule(44 + test_w);

    for l in labs {
        let report = if l.report_data.is_some() { "✓".green() } else { "–".dimmed() };
        println!(
            "{:<6} {:<8} {} {:<10} {} {}",
            l.id.dimmed(),
            l.patient_id,
            cell(&l.test_name, test_w),
            l.date,
            pad_colored(lab_status(l.status), 10),
            report
        );
    }
}

/// Print a lab report as a results table.
pub fn print_lab_report(test_name: &str, report: &LabReport) {
    println!("{}", test_name.cyan().bold());
    println!();

    let analyte_w = report
        .results
        .iter()
        .map(|r| UnicodeWidthStr::width(r.analyte.as_str()))
        .max()
        .unwrap_or(0)
        .clamp(8, 30);
    let result_w = report
        .results
        .iter()
        .map(|r| UnicodeWidthStr::width(r.result.as_str()))
        .max()
        .unwrap_or(0)
        .clamp(6, 20);

    println!(
        "{} {} {}",
        cell("Analyte", analyte_w).bold(),
        cell("Result", result_w).bold(),
        "Reference Range".bold()
    );
    rule(analyte_w + result_w + 20);
    for r in &report.results {
        println!(
            "{} {} {}",
            cell(&r.analyte, analyte_w),
            cell(&r.result, result_w),
            r.reference_range.dimmed()
        );
    }
    println!();
    println!("{}", "Interpretation".bold());
    println!("  {}", report.interpretation);
}

/// Print prescriptions as a table.
pub fn print_prescriptions_table(prescriptions: &[Prescription]) {
    if prescriptions.is_empty() {
        println!("{}", "No prescriptions found.".dimmed());
        return;
    }

    let med_w = flexible_width(50);
    println!(
        "{:<6} {:<8} {} {:<20} {}",
        "ID",
        "Patient",
        cell("Medication", med_w),
        "Dosage",
        "Status"
    );
    rule(50 + med_w);

    for p in prescriptions {
        println!(
            "{:<6} {:<8} {} {} {}",
            p.id.dimmed(),
            p.patient_id,
            cell(&p.medication, med_w),
            cell(&p.dosage, 20),
            prescription_status(p.status)
        );
    }
}

/// Print per-status counts on one line.
pub fn print_counts(counts: &BTreeMap<String, usize>) {
    let parts: Vec<String> = counts
        .iter()
        .map(|(status, n)| format!("{} {}", n.to_string().bold(), status))
        .collect();
    println!();
    println!(" {} {}", "■".cyan(), parts.join(&format!(" {} ", "·".dimmed())));
}

/// Print the hospital dashboard.
pub fn print_dashboard(summary: &DashboardSummary) {
    println!("{}", " HMS DASHBOARD ".on_blue().white().bold());
    println!();
    println!("  {:<16} {}", "Revenue".bold(), money(summary.total_revenue).green());
    println!("  {:<16} {}", "Patients".bold(), summary.patient_count);
    for (status, n) in &summary.patient_status {
        println!("    {:<14} {}", status.dimmed(), n);
    }
    println!("  {:<16} {}", "Doctors".bold(), summary.doctor_count);
    println!();

    if summary.recent_appointments.is_empty() {
        println!("{}", "No appointments yet.".dimmed());
        return;
    }

    println!("{}", "Appointments".bold());
    for a in &summary.recent_appointments {
        println!(
            "  {} {} {} {} {}",
            a.appointment.date,
            pad_right(&a.appointment.time, 8),
            cell(&a.appointment.patient_name, 24),
            cell(&a.doctor_name, 24).dimmed(),
            appointment_status(a.appointment.status)
        );
    }
}

/// Print one day's activity.
pub fn print_daily(daily: &DailyStats) {
    println!("{} {}", "Daily statistics".bold(), daily.date.to_string().cyan());
    println!();
    println!("  {:<16} {}", "Patients seen".bold(), daily.patients_seen);
    println!("  {:<16} {}", "Appointments".bold(), daily.appointment_count);
    println!("  {:<16} {}", "Collected".bold(), money(daily.revenue).green());

    if !daily.appointments_by_doctor.is_empty() {
        println!();
        println!("{}", "By doctor".bold());
        for (name, n) in &daily.appointments_by_doctor {
            println!("  {} {}", cell(name, 28), n);
        }
    }
}
