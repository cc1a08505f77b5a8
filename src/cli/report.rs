//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::TallyResult;
use crate::reports::InsightsReport;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::parse_date_or_today;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending this month, by month and by category
    Insights {
        /// Report on the month containing this date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TallyResult<()> {
    match cmd {
        ReportCommands::Insights { date } => {
            let as_of = parse_date_or_today(date.as_deref())?;
            let expenses = ExpenseService::new(storage).list()?;
            let report = InsightsReport::generate(&expenses, as_of);
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
    }

    Ok(())
}
