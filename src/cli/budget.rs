//! Budget CLI commands
//!
//! Budget management plus the daily rollover views: `status` for today's
//! banner and `ledger` for the day-by-day walk.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_budget_banner, format_budget_list, format_ledger_table};
use crate::error::TallyResult;
use crate::models::{BudgetPeriodKind, BudgetType};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

fn parse_period(s: &str) -> Result<BudgetPeriodKind, String> {
    match s.trim().to_lowercase().as_str() {
        "monthly" | "month" => Ok(BudgetPeriodKind::Monthly),
        "weekly" | "week" => Ok(BudgetPeriodKind::Weekly),
        "yearly" | "year" => Ok(BudgetPeriodKind::Yearly),
        other => Err(format!(
            "unknown period '{}' (expected monthly, weekly or yearly)",
            other
        )),
    }
}

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Add a budget (overall unless --category is given)
    Add {
        /// Budget amount per period
        amount: String,
        /// Period the amount covers
        #[arg(short, long, default_value = "monthly", value_parser = parse_period)]
        period: BudgetPeriodKind,
        /// Limit the budget to one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List budgets
    List,

    /// Change a budget's amount or period
    Edit {
        /// Budget ID (full or short form)
        id: String,
        /// New amount per period
        #[arg(short, long)]
        amount: Option<String>,
        /// New period
        #[arg(short, long, value_parser = parse_period)]
        period: Option<BudgetPeriodKind>,
    },

    /// Switch a budget on
    Activate {
        /// Budget ID (full or short form)
        id: String,
    },

    /// Switch a budget off
    Deactivate {
        /// Budget ID (full or short form)
        id: String,
    },

    /// Delete a budget
    Delete {
        /// Budget ID (full or short form)
        id: String,
    },

    /// Show today's daily budget with rollover
    Status {
        /// Evaluate as of this date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show the day-by-day rollover ledger for the month
    Ledger {
        /// Walk through this date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TallyResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            amount,
            period,
            category,
        } => {
            let budget_type = if category.is_some() {
                BudgetType::Category
            } else {
                BudgetType::Overall
            };
            let budget = service.add(parse_amount(&amount)?, period, budget_type, category)?;
            println!("Added {} [{}]", budget, budget.id);

            if !budget.is_overall_monthly() {
                println!("Note: only monthly overall budgets drive the daily budget.");
            }
        }

        BudgetCommands::List => {
            let budgets = service.list()?;
            let engine_budget = service.active_overall_monthly()?.map(|b| b.id);
            println!("{}", format_budget_list(&budgets, engine_budget, symbol));
        }

        BudgetCommands::Edit { id, amount, period } => {
            if amount.is_none() && period.is_none() {
                println!("No changes specified. Use --amount or --period.");
                return Ok(());
            }

            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let budget = service.update(&id, amount, period)?;
            println!("Updated {} [{}]", budget, budget.id);
        }

        BudgetCommands::Activate { id } => {
            let budget = service.set_active(&id, true)?;
            println!("Activated {} [{}]", budget, budget.id);
        }

        BudgetCommands::Deactivate { id } => {
            let budget = service.set_active(&id, false)?;
            println!("Deactivated {} [{}]", budget, budget.id);
        }

        BudgetCommands::Delete { id } => {
            let budget = service.delete(&id)?;
            println!("Deleted {} [{}]", budget, budget.id);
        }

        BudgetCommands::Status { date } => {
            let as_of = parse_date_or_today(date.as_deref())?;
            let info = service.daily_status(as_of)?;
            print!("{}", format_budget_banner(&info, symbol));
        }

        BudgetCommands::Ledger { date } => {
            let as_of = parse_date_or_today(date.as_deref())?;
            let ledger = service.daily_ledger(as_of)?;
            println!("{}", format_ledger_table(&ledger, symbol));
        }
    }

    Ok(())
}
