//! Daily budget rollover engine
//!
//! Splits a monthly budget evenly across the days of the month and walks the
//! month day by day up to an as-of date. Whatever a day leaves unspent is
//! added to the next day's allowance. A day that overspends resets the carry
//! to zero; deficits are never carried forward as debt.
//!
//! Two rollover figures come out of the walk. `carried_in` is the surplus that
//! earlier days handed to today and is part of today's allowance.
//! `rollover_amount` is what today hands on to tomorrow. What is available
//! today is `daily_budget + carried_in - spent_today`, clamped at zero, so it
//! always equals `rollover_amount` unless today is over budget.
//!
//! Everything here is a pure function of its arguments: no clock reads (except
//! in [`calculate_daily_budget_today`]), no I/O, no shared state.
//!
//! # Preconditions
//!
//! - `monthly_budget` must be positive. Callers validate budget rows before
//!   they get here; a zero or negative amount produces meaningless figures.
//! - The as-of day never exceeds the month length for a valid `NaiveDate`;
//!   this is asserted in debug builds.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, trace};

use crate::calendar::{days_in_month, is_within, month_bounds};
use crate::models::{ExpenseRecord, Money};

/// One evaluated day of the rollover ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayLedgerEntry {
    /// Day of month (1-based)
    pub day: u32,
    pub date: NaiveDate,
    /// Flat daily share plus the surplus carried into this day
    pub allowance: f64,
    /// Total spend recorded on this day
    pub spent: f64,
    /// Surplus carried into the next day (never negative)
    pub carry_forward: f64,
}

impl DayLedgerEntry {
    /// Allowance left after the day's spending; negative on a deficit day
    pub fn balance(&self) -> f64 {
        self.allowance - self.spent
    }

    pub fn is_deficit(&self) -> bool {
        self.balance() < 0.0
    }
}

/// Snapshot of the daily budget as of a given date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyBudgetInfo {
    /// `total_budget / days_in_month`, unrounded
    pub daily_budget: f64,
    pub total_budget: f64,
    pub days_in_month: u32,
    /// Day of month of the as-of date (1-based)
    pub current_day: u32,
    pub spent_today: f64,
    pub spent_this_month: f64,
    /// Today's remaining allowance, clamped at zero
    pub available_today: f64,
    /// Surplus carried into today from earlier days
    pub carried_in: f64,
    /// Surplus carried forward after today
    pub rollover_amount: f64,
    pub is_over_budget: bool,
    /// `spent_this_month / total_budget * 100`; may exceed 100
    pub budget_utilization: f64,
    /// Today's remaining allowance before clamping; negative when over budget
    pub unclamped_available: f64,
}

impl DailyBudgetInfo {
    /// How far today's spending exceeds today's allowance (zero if it doesn't)
    pub fn deficit(&self) -> f64 {
        if self.unclamped_available < 0.0 {
            -self.unclamped_available
        } else {
            0.0
        }
    }
}

/// Month-level figures shared by the ledger and the snapshot
struct MonthFrame {
    start: NaiveDate,
    end: NaiveDate,
    days_in_month: u32,
    current_day: u32,
    daily_budget: f64,
}

impl MonthFrame {
    fn new(monthly_budget: Money, as_of: NaiveDate) -> Self {
        let (start, end) = month_bounds(as_of);
        let days_in_month = days_in_month(start, end);
        let current_day = as_of.day();
        debug_assert!(
            current_day <= days_in_month,
            "day {} is beyond a {}-day month",
            current_day,
            days_in_month
        );

        Self {
            start,
            end,
            days_in_month,
            current_day,
            daily_budget: monthly_budget.as_units() / f64::from(days_in_month),
        }
    }

    fn month_expenses<'a>(&self, expenses: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        expenses
            .iter()
            .filter(|e| is_within(e.date, self.start, self.end))
            .collect()
    }

    fn walk(&self, month_expenses: &[&ExpenseRecord]) -> Vec<DayLedgerEntry> {
        let mut entries = Vec::with_capacity(self.current_day as usize);

        (1..=self.current_day).fold(0.0_f64, |rollover, day| {
            let date = self.start + Duration::days(i64::from(day - 1));
            let spent = total_spend(month_expenses.iter().filter(|e| e.date == date).copied());
            let allowance = self.daily_budget + rollover;
            let day_rollover = allowance - spent;
            let carry_forward = if day_rollover > 0.0 { day_rollover } else { 0.0 };

            debug!(day, allowance, spent, carry_forward, "evaluated budget day");

            entries.push(DayLedgerEntry {
                day,
                date,
                allowance,
                spent,
                carry_forward,
            });
            carry_forward
        });

        entries
    }
}

/// Sum of spend magnitudes, in currency units
fn total_spend<'a>(records: impl Iterator<Item = &'a ExpenseRecord>) -> f64 {
    records.map(|e| e.amount.abs()).sum::<Money>().as_units()
}

/// Day-by-day rollover ledger from the 1st of the month through `as_of`
pub fn daily_ledger(
    monthly_budget: Money,
    expenses: &[ExpenseRecord],
    as_of: NaiveDate,
) -> Vec<DayLedgerEntry> {
    let frame = MonthFrame::new(monthly_budget, as_of);
    let month_expenses = frame.month_expenses(expenses);
    frame.walk(&month_expenses)
}

/// Compute the daily budget snapshot as of `as_of`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tally::models::{ExpenseRecord, Money};
/// use tally::services::daily_budget::calculate_daily_budget;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 11, d).unwrap();
/// let expenses = [
///     ExpenseRecord::new(day(1), Money::from_units(-8)),
///     ExpenseRecord::new(day(2), Money::from_units(-5)),
/// ];
/// let info = calculate_daily_budget(Money::from_units(300), &expenses, day(2));
/// assert_eq!(info.daily_budget, 10.0);
/// assert_eq!(info.rollover_amount, 7.0);
/// ```
pub fn calculate_daily_budget(
    monthly_budget: Money,
    expenses: &[ExpenseRecord],
    as_of: NaiveDate,
) -> DailyBudgetInfo {
    let frame = MonthFrame::new(monthly_budget, as_of);
    let month_expenses = frame.month_expenses(expenses);
    let spent_this_month = total_spend(month_expenses.iter().copied());
    let ledger = frame.walk(&month_expenses);

    let (carried_in, spent_today, rollover_amount) = match ledger.last() {
        Some(today) => (today.allowance - frame.daily_budget, today.spent, today.carry_forward),
        None => (0.0, 0.0, 0.0),
    };

    let total_budget = monthly_budget.as_units();
    let unclamped_available = frame.daily_budget + carried_in - spent_today;
    let info = DailyBudgetInfo {
        daily_budget: frame.daily_budget,
        total_budget,
        days_in_month: frame.days_in_month,
        current_day: frame.current_day,
        spent_today,
        spent_this_month,
        available_today: unclamped_available.max(0.0),
        carried_in,
        rollover_amount,
        is_over_budget: unclamped_available < 0.0,
        budget_utilization: spent_this_month / total_budget * 100.0,
        unclamped_available,
    };

    trace!(?info, %as_of, "computed daily budget");
    info
}

/// [`calculate_daily_budget`] as of the local current date
pub fn calculate_daily_budget_today(
    monthly_budget: Money,
    expenses: &[ExpenseRecord],
) -> DailyBudgetInfo {
    let today = chrono::Local::now().date_naive();
    calculate_daily_budget(monthly_budget, expenses, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nov(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    fn spend(d: u32, units: i64) -> ExpenseRecord {
        ExpenseRecord::new(nov(d), Money::from_units(-units))
    }

    fn budget() -> Money {
        Money::from_units(300)
    }

    #[test]
    fn test_november_rollover_fixture() {
        let expenses = vec![spend(1, 8), spend(2, 5), spend(3, 15), spend(4, 3)];

        let info = calculate_daily_budget(budget(), &expenses, nov(4));

        assert_eq!(info.daily_budget, 10.0);
        assert_eq!(info.total_budget, 300.0);
        assert_eq!(info.days_in_month, 30);
        assert_eq!(info.current_day, 4);
        // 10-8=2, 12-5=7, 17-15=2, 12-3=9
        assert_eq!(info.rollover_amount, 9.0);
        assert_eq!(info.carried_in, 2.0);
        assert_eq!(info.spent_today, 3.0);
        assert_eq!(info.spent_this_month, 31.0);
        assert_eq!(info.available_today, 9.0);
        assert!(!info.is_over_budget);
    }

    #[test]
    fn test_consecutive_overspend_is_over_budget() {
        let expenses = vec![spend(1, 15), spend(2, 20)];

        let info = calculate_daily_budget(budget(), &expenses, nov(2));

        assert!(info.is_over_budget);
        assert_eq!(info.available_today, 0.0);
        assert_eq!(info.unclamped_available, -10.0);
        assert_eq!(info.deficit(), 10.0);
        assert_eq!(info.rollover_amount, 0.0);
    }

    #[test]
    fn test_exact_spending_leaves_nothing_available_today() {
        let expenses = vec![spend(1, 10), spend(2, 10)];

        let info = calculate_daily_budget(budget(), &expenses, nov(2));

        assert_eq!(info.rollover_amount, 0.0);
        assert_eq!(info.carried_in, 0.0);
        assert!(!info.is_over_budget);
        // today's 10 is already spent; the fresh 10 belongs to tomorrow
        assert_eq!(info.unclamped_available, 0.0);
        assert_eq!(info.available_today, 0.0);
    }

    #[test]
    fn test_available_today_is_allowance_less_spend() {
        let cases: &[(&[(u32, i64)], u32)] = &[
            (&[(1, 8)], 1),
            (&[(1, 8), (2, 5), (3, 15), (4, 3)], 4),
            (&[(1, 15), (2, 20)], 2),
            (&[(2, 4), (5, 30)], 6),
        ];

        for (spends, as_of) in cases {
            let expenses: Vec<_> = spends.iter().map(|&(d, u)| spend(d, u)).collect();
            let info = calculate_daily_budget(budget(), &expenses, nov(*as_of));

            let expected = info.daily_budget + info.carried_in - info.spent_today;
            assert_eq!(info.unclamped_available, expected);
            assert_eq!(info.available_today, expected.max(0.0));
            if !info.is_over_budget {
                assert_eq!(info.available_today, info.rollover_amount);
            }
        }
    }

    #[test]
    fn test_first_day_carries_nothing_in() {
        let info = calculate_daily_budget(budget(), &[spend(1, 8)], nov(1));

        assert_eq!(info.carried_in, 0.0);
        assert_eq!(info.available_today, 2.0);
        assert_eq!(info.rollover_amount, 2.0);
    }

    #[test]
    fn test_deficit_is_not_carried_forward() {
        let expenses = vec![spend(1, 250)];

        let ledger = daily_ledger(budget(), &expenses, nov(2));

        assert_eq!(ledger.len(), 2);
        assert!(ledger[0].is_deficit());
        assert_eq!(ledger[0].carry_forward, 0.0);
        assert_eq!(ledger[1].allowance, 10.0);
        assert_eq!(ledger[1].carry_forward, 10.0);
    }

    #[test]
    fn test_idle_days_stay_available() {
        let mut previous = 0.0;
        for day in 1..=30 {
            let info = calculate_daily_budget(budget(), &[], nov(day));
            assert!(!info.is_over_budget);
            assert_eq!(info.spent_today, 0.0);
            assert!(info.rollover_amount > previous);
            assert_eq!(info.rollover_amount, 10.0 * f64::from(day));
            assert_eq!(info.carried_in, 10.0 * f64::from(day - 1));
            // unspent days pile up on top of today's share
            assert_eq!(info.available_today, info.daily_budget + info.carried_in);
            previous = info.rollover_amount;
        }
    }

    #[test]
    fn test_first_day_spent_today_matches_month() {
        let expenses = vec![spend(1, 4), spend(1, 6)];

        let info = calculate_daily_budget(budget(), &expenses, nov(1));

        assert_eq!(info.spent_today, 10.0);
        assert_eq!(info.spent_this_month, info.spent_today);
    }

    #[test]
    fn test_is_idempotent() {
        let expenses = vec![spend(1, 8), spend(3, 15), spend(9, 2)];

        let first = calculate_daily_budget(budget(), &expenses, nov(9));
        let second = calculate_daily_budget(budget(), &expenses, nov(9));

        assert_eq!(first, second);
    }

    #[test]
    fn test_other_months_are_ignored() {
        let expenses = vec![
            ExpenseRecord::new(
                NaiveDate::from_ymd_opt(2024, 10, 31).unwrap(),
                Money::from_units(-100),
            ),
            ExpenseRecord::new(
                NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                Money::from_units(-100),
            ),
            spend(2, 5),
        ];

        let info = calculate_daily_budget(budget(), &expenses, nov(2));

        assert_eq!(info.spent_this_month, 5.0);
        assert_eq!(info.rollover_amount, 15.0);
    }

    #[test]
    fn test_future_days_count_toward_month_only() {
        let expenses = vec![spend(1, 2), spend(20, 148)];

        let info = calculate_daily_budget(budget(), &expenses, nov(1));

        assert_eq!(info.spent_today, 2.0);
        assert_eq!(info.spent_this_month, 150.0);
        assert_eq!(info.budget_utilization, 50.0);
    }

    #[test]
    fn test_utilization_is_unclamped() {
        let expenses = vec![spend(1, 450)];

        let info = calculate_daily_budget(budget(), &expenses, nov(1));

        assert_eq!(info.budget_utilization, 150.0);
        assert!(info.is_over_budget);
    }

    #[test]
    fn test_spend_uses_magnitudes() {
        let expenses = vec![
            spend(1, 3),
            ExpenseRecord::new(nov(1), Money::from_units(2)),
        ];

        let info = calculate_daily_budget(budget(), &expenses, nov(1));

        assert_eq!(info.spent_today, 5.0);
        assert_eq!(info.spent_this_month, 5.0);
    }

    #[test]
    fn test_fractional_daily_budget() {
        let january = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let info = calculate_daily_budget(Money::from_units(100), &[], january);

        assert_eq!(info.days_in_month, 31);
        assert_eq!(info.daily_budget, 100.0 / 31.0);
        assert_eq!(info.rollover_amount, info.daily_budget);
    }

    #[test]
    fn test_ledger_runs_to_month_end() {
        let ledger = daily_ledger(budget(), &[spend(30, 1)], nov(30));

        assert_eq!(ledger.len(), 30);
        let last = ledger[29];
        assert_eq!(last.date, nov(30));
        assert_eq!(last.spent, 1.0);
        assert_eq!(last.carry_forward, 299.0);
    }
}
