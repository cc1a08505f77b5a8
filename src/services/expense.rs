//! Expense service
//!
//! CRUD over expenses with validation and audit logging.

use tracing::info;

use chrono::NaiveDate;

use crate::calendar::Month;
use crate::error::{TallyError, TallyResult};
use crate::models::{Expense, ExpenseId, ExpenseRecord, Money};
use crate::storage::Storage;

/// Field changes for [`ExpenseService::edit`]; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    /// New magnitude; the expense keeps its direction (spend or refund)
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the store
    pub store: Option<Option<String>>,
    /// `Some(None)` clears the payment method
    pub payment_method: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.store.is_none()
            && self.payment_method.is_none()
            && self.tags.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new expense
    pub fn add(&self, mut expense: Expense) -> TallyResult<Expense> {
        expense.description = expense.description.trim().to_string();
        expense.category = expense.category.trim().to_string();
        expense
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_create(&expense)?;

        info!(id = %expense.id, amount = %expense.amount, date = %expense.date, "expense added");
        Ok(expense)
    }

    /// Replace a stored expense
    pub fn update(&self, mut expense: Expense) -> TallyResult<Expense> {
        let before = self
            .storage
            .expenses
            .get(expense.id)?
            .ok_or_else(|| TallyError::expense_not_found(expense.id.to_string()))?;

        expense
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;
        expense.updated_at = chrono::Utc::now();

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_update(&before, &expense)?;

        info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Apply `changes` to the expense matching `query`
    pub fn edit(&self, query: &str, changes: ExpenseChanges) -> TallyResult<Expense> {
        let mut expense = self
            .find(query)?
            .ok_or_else(|| TallyError::expense_not_found(query))?;

        if let Some(amount) = changes.amount {
            let magnitude = amount.abs();
            expense.amount = if expense.is_outflow() { -magnitude } else { magnitude };
        }
        if let Some(description) = changes.description {
            expense.description = description.trim().to_string();
        }
        if let Some(category) = changes.category {
            expense.category = category.trim().to_string();
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(store) = changes.store {
            expense.store = non_blank(store);
        }
        if let Some(method) = changes.payment_method {
            expense.payment_method = non_blank(method);
        }
        if let Some(tags) = changes.tags {
            expense.tags = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }

        self.update(expense)
    }

    /// Delete an expense by full or short ID
    pub fn delete(&self, query: &str) -> TallyResult<Expense> {
        let expense = self
            .find(query)?
            .ok_or_else(|| TallyError::expense_not_found(query))?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;
        self.storage.log_delete(&expense)?;

        info!(id = %expense.id, "expense deleted");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> TallyResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    pub fn find(&self, query: &str) -> TallyResult<Option<Expense>> {
        self.storage.expenses.find(query)
    }

    /// All expenses, newest first
    pub fn list(&self) -> TallyResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses dated within `month`, newest first
    pub fn list_in_month(&self, month: Month) -> TallyResult<Vec<Expense>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| month.contains(e.date))
            .collect())
    }

    /// The `(date, amount)` view of every expense, for the budget engine
    pub fn records(&self) -> TallyResult<Vec<ExpenseRecord>> {
        Ok(self.list()?.iter().map(ExpenseRecord::from).collect())
    }
}
