//! Budget model
//!
//! A budget is a spending limit over a period. It is either an overall budget
//! or a budget for a single category, and it can be switched on and off. The
//! daily rollover engine consumes the one active overall monthly budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// The period a budget amount covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriodKind {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl fmt::Display for BudgetPeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// Whether a budget applies to all spending or to one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetType {
    #[default]
    Overall,
    Category,
}

impl fmt::Display for BudgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => write!(f, "overall"),
            Self::Category => write!(f, "category"),
        }
    }
}

/// A stored budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// Budget amount for one period (must be positive)
    pub amount: Money,

    #[serde(default)]
    pub period: BudgetPeriodKind,

    #[serde(default)]
    pub budget_type: BudgetType,

    /// Category name for category budgets
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Budget {
    /// Create an active overall monthly budget
    pub fn overall_monthly(amount: Money) -> Self {
        Self::new(amount, BudgetPeriodKind::Monthly, BudgetType::Overall, None)
    }

    /// Create a new active budget
    pub fn new(
        amount: Money,
        period: BudgetPeriodKind,
        budget_type: BudgetType,
        category: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            amount,
            period,
            budget_type,
            category,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this budget feeds the daily rollover engine
    pub fn is_overall_monthly(&self) -> bool {
        self.period == BudgetPeriodKind::Monthly && self.budget_type == BudgetType::Overall
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }

        match (self.budget_type, &self.category) {
            (BudgetType::Category, None) => Err(BudgetValidationError::MissingCategory),
            (BudgetType::Category, Some(name)) if name.trim().is_empty() => {
                Err(BudgetValidationError::MissingCategory)
            }
            (BudgetType::Overall, Some(_)) => Err(BudgetValidationError::UnexpectedCategory),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(
                f,
                "{} {} budget for {}: {}",
                self.period, self.budget_type, category, self.amount
            ),
            None => write!(
                f,
                "{} {} budget: {}",
                self.period, self.budget_type, self.amount
            ),
        }
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount,
    MissingCategory,
    UnexpectedCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Budget amount must be positive"),
            Self::MissingCategory => write!(f, "Category budgets require a category"),
            Self::UnexpectedCategory => write!(f, "Overall budgets cannot have a category"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
