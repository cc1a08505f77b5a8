//! Budget service
//!
//! Manages stored budgets and runs the daily rollover engine against the
//! active overall monthly budget.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{TallyError, TallyResult};
use crate::models::{Budget, BudgetPeriodKind, BudgetType, Money};
use crate::storage::Storage;

use super::daily_budget::{calculate_daily_budget, daily_ledger, DailyBudgetInfo, DayLedgerEntry};
use super::expense::ExpenseService;

/// The budget the daily engine runs against: the first active monthly
/// overall budget in `budgets` order
pub fn select_active_overall(budgets: &[Budget]) -> Option<&Budget> {
    budgets
        .iter()
        .find(|b| b.is_active && b.is_overall_monthly())
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an active budget
    pub fn add(
        &self,
        amount: Money,
        period: BudgetPeriodKind,
        budget_type: BudgetType,
        category: Option<String>,
    ) -> TallyResult<Budget> {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let budget = Budget::new(amount, period, budget_type, category);
        budget
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_create(&budget)?;

        info!(id = %budget.id, amount = %budget.amount, "budget added");
        Ok(budget)
    }

    /// Change a budget's amount or period
    pub fn update(
        &self,
        query: &str,
        amount: Option<Money>,
        period: Option<BudgetPeriodKind>,
    ) -> TallyResult<Budget> {
        let before = self.require(query)?;

        let mut budget = before.clone();
        if let Some(amount) = amount {
            budget.amount = amount;
        }
        if let Some(period) = period {
            budget.period = period;
        }
        budget
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;
        budget.updated_at = chrono::Utc::now();

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_update(&before, &budget)?;

        info!(id = %budget.id, amount = %budget.amount, "budget updated");
        Ok(budget)
    }

    /// Switch a budget on or off
    pub fn set_active(&self, query: &str, active: bool) -> TallyResult<Budget> {
        let before = self.require(query)?;
        if before.is_active == active {
            return Ok(before);
        }

        let mut budget = before.clone();
        budget.set_active(active);

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_update(&before, &budget)?;

        info!(id = %budget.id, active, "budget toggled");
        Ok(budget)
    }

    pub fn delete(&self, query: &str) -> TallyResult<Budget> {
        let budget = self.require(query)?;

        self.storage.budgets.delete(budget.id)?;
        self.storage.budgets.save()?;
        self.storage.log_delete(&budget)?;

        info!(id = %budget.id, "budget deleted");
        Ok(budget)
    }

    pub fn find(&self, query: &str) -> TallyResult<Option<Budget>> {
        self.storage.budgets.find(query)
    }

    fn require(&self, query: &str) -> TallyResult<Budget> {
        self.find(query)?
            .ok_or_else(|| TallyError::budget_not_found(query))
    }

    /// All budgets, oldest first
    pub fn list(&self) -> TallyResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    pub fn active_overall_monthly(&self) -> TallyResult<Option<Budget>> {
        let budgets = self.list()?;
        Ok(select_active_overall(&budgets).cloned())
    }

    fn require_active(&self) -> TallyResult<Budget> {
        self.active_overall_monthly()?.ok_or_else(|| {
            TallyError::Budget(
                "No active monthly overall budget. Add one with `tally budget add <amount>`"
                    .into(),
            )
        })
    }

    /// Daily budget snapshot as of `as_of`
    pub fn daily_status(&self, as_of: NaiveDate) -> TallyResult<DailyBudgetInfo> {
        let budget = self.require_active()?;
        let records = ExpenseService::new(self.storage).records()?;
        debug!(budget = %budget.id, expenses = records.len(), %as_of, "running daily budget");

        Ok(calculate_daily_budget(budget.amount, &records, as_of))
    }

    /// Day-by-day ledger from the 1st through `as_of`
    pub fn daily_ledger(&self, as_of: NaiveDate) -> TallyResult<Vec<DayLedgerEntry>> {
        let budget = self.require_active()?;
        let records = ExpenseService::new(self.storage).records()?;

        Ok(daily_ledger(budget.amount, &records, as_of))
    }
}
