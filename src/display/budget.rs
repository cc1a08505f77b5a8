//! Budget display formatting
//!
//! The daily budget banner, the per-day rollover ledger and the budget list.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Budget, BudgetId};
use crate::services::daily_budget::{DailyBudgetInfo, DayLedgerEntry};
use crate::services::status::{budget_severity, format_budget_status_with_symbol};

use super::report::{format_bar, format_money_f64, format_percentage};

const PROGRESS_WIDTH: usize = 30;

/// Multi-line daily budget summary
pub fn format_budget_banner(info: &DailyBudgetInfo, symbol: &str) -> String {
    let money = |v: f64| format_money_f64(v, symbol);

    let mut output = String::new();
    output.push_str(&format!(
        "Day {} of {}: {}\n",
        info.current_day,
        info.days_in_month,
        format_budget_status_with_symbol(info, symbol)
    ));
    output.push_str(&format!("  Status:        {}\n", budget_severity(info)));
    output.push_str(&format!("  Daily budget:  {}\n", money(info.daily_budget)));
    output.push_str(&format!("  Spent today:   {}\n", money(info.spent_today)));
    output.push_str(&format!(
        "  Spent so far:  {} of {}\n",
        money(info.spent_this_month),
        money(info.total_budget)
    ));
    output.push_str(&format!("  Carried in:    {}\n", money(info.carried_in)));
    output.push_str(&format!("  Carry forward: {}\n", money(info.rollover_amount)));
    output.push_str(&format!(
        "  Month used:    {} {}\n",
        format_bar(info.budget_utilization.min(100.0), 100.0, PROGRESS_WIDTH),
        format_percentage(info.budget_utilization)
    ));

    output
}

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Allowance")]
    allowance: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Carry")]
    carry: String,
    #[tabled(rename = "")]
    note: &'static str,
}

/// Table of the day-by-day rollover walk
pub fn format_ledger_table(entries: &[DayLedgerEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "No days to show.".to_string();
    }

    let rows = entries.iter().map(|entry| LedgerRow {
        day: entry.day,
        date: entry.date.to_string(),
        allowance: format_money_f64(entry.allowance, symbol),
        spent: format_money_f64(entry.spent, symbol),
        carry: format_money_f64(entry.carry_forward, symbol),
        note: if entry.is_deficit() { "reset" } else { "" },
    });

    Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()))
        .to_string()
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Type")]
    budget_type: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Table of budgets, marking the one the daily engine uses
pub fn format_budget_list(budgets: &[Budget], engine_budget: Option<BudgetId>, symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets.iter().map(|budget| BudgetRow {
        id: budget.id.to_string(),
        amount: budget.amount.format_with_symbol(symbol),
        period: budget.period.to_string(),
        budget_type: budget.budget_type.to_string(),
        category: budget.category.clone().unwrap_or_default(),
        status: if Some(budget.id) == engine_budget {
            "daily"
        } else if budget.is_active {
            "active"
        } else {
            "inactive"
        },
    });

    Table::new(rows).with(Style::sharp()).to_string()
}
