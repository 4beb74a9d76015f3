//! Billing commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use hms_core::billing::{self, model::BillingStatus};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum BillingCommands {
    /// List bills
    List {
        /// Paid, Pending or Overdue
        #[arg(long)]
        status: Option<String>,
    },

    /// Print the invoice for a bill
    Invoice {
        /// Bill ID (e.g. bill1)
        id: String,
    },

    /// Mark a bill as paid
    Pay {
        /// Bill ID
        id: String,
    },
}

pub async fn execute(cmd: BillingCommands, ctx: &Context) -> Result<()> {
    let pool = &ctx.pool;

    match cmd {
        BillingCommands::List { status } => {
            let status = status.as_deref().map(BillingStatus::parse_input).transpose()?;
            let bills = billing::list_bills(pool, status).await?;
            output::print_bills_table(&bills);
        }

        BillingCommands::Invoice { id } => {
            let invoice = billing::invoice(pool, &id).await?;
            output::print_invoice(&invoice);
        }

        BillingCommands::Pay { id } => {
            let bill = billing::update_bill_status(pool, &id, BillingStatus::Paid).await?;
            println!(
                "{} {} marked paid ({})",
                "✓".green().bold(),
                bill.id.cyan(),
                output::money(bill.amount)
            );
        }
    }

    Ok(())
}
