//! Statistics commands.

use anyhow::Result;
use clap::Subcommand;
use hms_core::stats;
use hms_core::validation;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Hospital-wide overview
    Dashboard,

    /// Activity on one day
    Daily {
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub async fn execute(cmd: StatsCommands, ctx: &Context) -> Result<()> {
    match cmd {
        StatsCommands::Dashboard => {
            let summary = stats::dashboard_summary(&ctx.pool).await?;
            output::print_dashboard(&summary);
        }

        StatsCommands::Daily { date } => {
            let date = match date {
                Some(d) => validation::parse_date(&d)?,
                None => validation::today(),
            };
            let daily = stats::daily_stats(&ctx.pool, date).await?;
            output::print_daily(&daily);
        }
    }

    Ok(())
}
