//! Expense CLI commands

use clap::Subcommand;

use crate::calendar::Month;
use crate::config::settings::Settings;
use crate::display::format_expense_table;
use crate::error::{TallyError, TallyResult};
use crate::models::Expense;
use crate::services::{ExpenseChanges, ExpenseService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount spent (e.g. "12.50")
        amount: String,
        /// What the money went on
        description: String,
        /// Category
        #[arg(short, long, default_value = "Uncategorized")]
        category: String,
        /// Date of the expense (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Store or merchant
        #[arg(short, long)]
        store: Option<String>,
        /// Payment method; matches a credit card's payment method
        #[arg(short = 'm', long)]
        payment_method: Option<String>,
        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Mark as a recurring expense
        #[arg(long)]
        recurring: bool,
        /// Who the purchase was a gift for
        #[arg(long)]
        gift: Option<String>,
        /// Record money coming back instead of going out
        #[arg(long)]
        refund: bool,
    },

    /// List expenses, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Edit an expense; the amount keeps its spend or refund direction
    Edit {
        /// Expense ID (full or short form)
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New store ("" clears it)
        #[arg(short, long)]
        store: Option<String>,
        /// New payment method ("" clears it)
        #[arg(short = 'm', long)]
        payment_method: Option<String>,
        /// Replace the tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TallyResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
            store,
            payment_method,
            tags,
            recurring,
            gift,
            refund,
        } => {
            let magnitude = parse_amount(&amount)?.abs();
            let amount = if refund { magnitude } else { -magnitude };
            let date = parse_date_or_today(date.as_deref())?;

            let mut expense = Expense::new(date, amount, description, category);
            expense.store = store;
            expense.payment_method = payment_method;
            expense.tags = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            expense.recurring = recurring;
            expense.gift = gift;

            let expense = service.add(expense)?;
            println!(
                "Recorded {} for '{}' on {} [{}]",
                expense.amount.abs().format_with_symbol(symbol),
                expense.description,
                expense.date,
                expense.id
            );
        }

        ExpenseCommands::List { month, limit } => {
            let mut expenses = match month {
                Some(m) => {
                    let month = Month::parse(&m).map_err(|e| TallyError::Validation(e.to_string()))?;
                    service.list_in_month(month)?
                }
                None => service.list()?,
            };
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            println!(
                "{}",
                format_expense_table(&expenses, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
            store,
            payment_method,
            tags,
        } => {
            let changes = ExpenseChanges {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                category,
                date: date
                    .as_deref()
                    .map(|d| parse_date_or_today(Some(d)))
                    .transpose()?,
                store: store.map(Some),
                payment_method: payment_method.map(Some),
                tags,
            };
            if changes.is_empty() {
                println!(
                    "No changes specified. Use --amount, --description, --category, --date, \
                     --store, --payment-method or --tags."
                );
                return Ok(());
            }

            let expense = service.edit(&id, changes)?;
            println!(
                "Updated expense '{}' [{}]: {} on {}",
                expense.description,
                expense.id,
                expense.amount.format_with_symbol(symbol),
                expense.date
            );
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(&id)?;
            println!("Deleted expense '{}' [{}]", expense.description, expense.id);
        }
    }

    Ok(())
}
