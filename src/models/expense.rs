//! Expense model
//!
//! An expense is a dated outflow (stored as a negative amount) with a
//! category and optional store, payment method and tags. The budget engine
//! only looks at the `(date, amount)` projection, [`ExpenseRecord`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Amount (negative for outflow, positive for refunds)
    pub amount: Money,

    pub description: String,

    pub category: String,

    /// Calendar date the expense happened on
    pub date: NaiveDate,

    #[serde(default)]
    pub store: Option<String>,

    /// Payment method label; credit cards are matched on this
    #[serde(default)]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub recurring: bool,

    /// Who the purchase was a gift for, if anyone
    #[serde(default)]
    pub gift: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            amount,
            description: description.into(),
            category: category.into(),
            date,
            store: None,
            payment_method: None,
            tags: Vec::new(),
            recurring: false,
            gift: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_zero() {
            return Err(ExpenseValidationError::ZeroAmount);
        }
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// The `(date, amount)` view of an expense consumed by the budget engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub amount: Money,
}

impl ExpenseRecord {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            date: expense.date,
            amount: expense.amount,
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    ZeroAmount,
    EmptyDescription,
    EmptyCategory,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "Expense amount cannot be zero"),
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
