//! Spending insights
//!
//! Spending this month, spending per calendar month across all history, and
//! this month's spending per category. Spending is the negated sum of signed
//! amounts, so refunds offset purchases.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::calendar::Month;
use crate::display::report::{format_bar, format_percentage, separator};
use crate::models::{Expense, Money};

const BAR_WIDTH: usize = 30;

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: Month,
    pub spending: Money,
    pub expense_count: usize,
}

/// Spending for one category in the current month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub spending: Money,
    pub expense_count: usize,
    /// Share of this month's spending
    pub percentage: f64,
}

/// Insights report
#[derive(Debug, Clone)]
pub struct InsightsReport {
    pub month: Month,
    pub this_month_spending: Money,
    pub this_month_count: usize,
    /// Ascending by month
    pub by_month: Vec<MonthTotal>,
    /// Largest spending first
    pub by_category: Vec<CategoryTotal>,
}

impl InsightsReport {
    /// Build the report for the month containing `as_of`
    pub fn generate(expenses: &[Expense], as_of: NaiveDate) -> Self {
        let month = Month::containing(as_of);

        let mut months: BTreeMap<Month, (Money, usize)> = BTreeMap::new();
        for expense in expenses {
            let entry = months
                .entry(Month::containing(expense.date))
                .or_insert((Money::zero(), 0));
            entry.0 -= expense.amount;
            entry.1 += 1;
        }

        let mut categories: HashMap<&str, (Money, usize)> = HashMap::new();
        for expense in expenses.iter().filter(|e| month.contains(e.date)) {
            let entry = categories
                .entry(expense.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 -= expense.amount;
            entry.1 += 1;
        }

        let (this_month_spending, this_month_count) =
            months.get(&month).copied().unwrap_or((Money::zero(), 0));

        let mut by_category: Vec<CategoryTotal> = categories
            .into_iter()
            .map(|(category, (spending, expense_count))| CategoryTotal {
                category: category.to_string(),
                spending,
                expense_count,
                percentage: share(spending, this_month_spending),
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.spending
                .cmp(&a.spending)
                .then_with(|| a.category.cmp(&b.category))
        });

        let by_month = months
            .into_iter()
            .map(|(month, (spending, expense_count))| MonthTotal {
                month,
                spending,
                expense_count,
            })
            .collect();

        Self {
            month,
            this_month_spending,
            this_month_count,
            by_month,
            by_category,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Insights: {}\n", self.month));
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "Total spending this month: {} ({} expenses)\n",
            self.this_month_spending.format_with_symbol(symbol),
            self.this_month_count
        ));

        output.push_str("\nTotals by month\n");
        if self.by_month.is_empty() {
            output.push_str("  No expenses recorded.\n");
        }
        let month_max = self
            .by_month
            .iter()
            .map(|m| m.spending.as_units())
            .fold(0.0, f64::max);
        for row in &self.by_month {
            output.push_str(&format!(
                "  {}  {} {:>12}\n",
                row.month,
                format_bar(row.spending.as_units(), month_max, BAR_WIDTH),
                row.spending.format_with_symbol(symbol)
            ));
        }

        output.push_str(&format!("\nBy category ({})\n", self.month));
        if self.by_category.is_empty() {
            output.push_str("  No expenses this month.\n");
        }
        let category_max = self
            .by_category
            .first()
            .map(|c| c.spending.as_units())
            .unwrap_or(0.0);
        for row in &self.by_category {
            output.push_str(&format!(
                "  {:<16} {} {:>12} {:>6}\n",
                row.category,
                format_bar(row.spending.as_units(), category_max, BAR_WIDTH),
                row.spending.format_with_symbol(symbol),
                format_percentage(row.percentage)
            ));
        }

        output
    }
}

fn share(part: Money, total: Money) -> f64 {
    if total.is_positive() {
        part.cents() as f64 / total.cents() as f64 * 100.0
    } else {
        0.0
    }
}
