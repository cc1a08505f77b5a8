//! Display formatting for terminal output

pub mod budget;
pub mod credit_card;
pub mod expense;
pub mod report;

pub use budget::{format_budget_banner, format_budget_list, format_ledger_table};
pub use credit_card::{format_payment_table, format_utilization_list};
pub use expense::format_expense_table;
