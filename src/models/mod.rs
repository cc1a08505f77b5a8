//! Core data models for Tally
//!
//! Expenses, budgets, credit cards and card payments, plus the money and ID
//! value types they are built from.

pub mod budget;
pub mod credit_card;
pub mod expense;
pub mod ids;
pub mod money;

pub use budget::{Budget, BudgetPeriodKind, BudgetType, BudgetValidationError};
pub use credit_card::{CardValidationError, CreditCard, CreditCardPayment};
pub use expense::{Expense, ExpenseRecord, ExpenseValidationError};
pub use ids::{BudgetId, CardId, ExpenseId, PaymentId};
pub use money::{Money, MoneyParseError};
