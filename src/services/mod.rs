//! Service layer for Tally
//!
//! The pure calculators (`daily_budget`, `status`, `utilization`) work on
//! plain values. The storage-backed services on top of them validate input,
//! persist changes and write audit entries.

pub mod budget;
pub mod credit_card;
pub mod daily_budget;
pub mod expense;
pub mod payment;
pub mod status;
pub mod utilization;

pub use budget::{select_active_overall, BudgetService};
pub use credit_card::CreditCardService;
pub use daily_budget::{
    calculate_daily_budget, calculate_daily_budget_today, daily_ledger, DailyBudgetInfo,
    DayLedgerEntry,
};
pub use expense::{ExpenseChanges, ExpenseService};
pub use payment::PaymentService;
pub use status::{budget_severity, format_budget_status, BudgetSeverity};
pub use utilization::{calculate_utilization, UtilizationResult, UtilizationTier};
