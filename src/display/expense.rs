//! Expense display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Paid with")]
    payment_method: String,
}

/// Table of expenses with a total line
///
/// `date_format` is a strftime pattern.
pub fn format_expense_table(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|expense| ExpenseRow {
        id: expense.id.to_string(),
        date: expense.date.format(date_format).to_string(),
        amount: expense.amount.format_with_symbol(symbol),
        description: truncate(&expense.description, 32),
        category: expense.category.clone(),
        payment_method: expense.payment_method.clone().unwrap_or_default(),
    });

    let table = Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string();

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expenses, net {}",
        table,
        expenses.len(),
        total.format_with_symbol(symbol)
    )
}
