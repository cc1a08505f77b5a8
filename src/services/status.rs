//! Budget status formatting
//!
//! Maps a [`DailyBudgetInfo`] snapshot to a one-line status message and a
//! severity tier for display.

use serde::Serialize;
use std::fmt;

use super::daily_budget::DailyBudgetInfo;

/// Month utilization (percent) above which the budget is flagged
pub const WARNING_UTILIZATION: f64 = 80.0;

/// How alarming the current budget state is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSeverity {
    Normal,
    Warning,
    OverBudget,
}

impl fmt::Display for BudgetSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "On track"),
            Self::Warning => write!(f, "Warning"),
            Self::OverBudget => write!(f, "Over budget"),
        }
    }
}

/// Status message using `$` as the currency symbol
pub fn format_budget_status(info: &DailyBudgetInfo) -> String {
    format_budget_status_with_symbol(info, "$")
}

/// Status message for today's budget
///
/// When over budget the message reports the size of today's deficit, taken
/// from the unclamped available amount rather than the clamped public field.
/// The rollover called out is the surplus carried into today, the part of
/// today's allowance that earlier days left behind.
pub fn format_budget_status_with_symbol(info: &DailyBudgetInfo, symbol: &str) -> String {
    if info.is_over_budget {
        return format!(
            "Over budget by {}{:.2} today",
            symbol,
            info.unclamped_available.abs()
        );
    }

    if info.carried_in > 0.0 {
        return format!(
            "{}{:.2} available today (includes {}{:.2} rollover)",
            symbol, info.available_today, symbol, info.carried_in
        );
    }

    format!("{}{:.2} available today", symbol, info.available_today)
}

/// Severity tier: over budget, then month utilization above 80%, else normal
pub fn budget_severity(info: &DailyBudgetInfo) -> BudgetSeverity {
    if info.is_over_budget {
        BudgetSeverity::OverBudget
    } else if info.budget_utilization > WARNING_UTILIZATION {
        BudgetSeverity::Warning
    } else {
        BudgetSeverity::Normal
    }
}
