//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Each submodule owns
//! one subcommand group and a `handle_*_command` entry point.

pub mod budget;
pub mod card;
pub mod expense;
pub mod log;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use card::{handle_card_command, CardCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use log::handle_log_command;
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::models::Money;

/// Parse a `YYYY-MM-DD` date, defaulting to today's local date
pub fn parse_date_or_today(date: Option<&str>) -> TallyResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            TallyError::Validation(format!("Invalid date '{}'; expected YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse a user-supplied amount such as `12.50` or `$12.50`
pub fn parse_amount(s: &str) -> TallyResult<Money> {
    Money::parse(s).map_err(|e| TallyError::Validation(e.to_string()))
}
