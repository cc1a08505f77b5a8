//! Tally - terminal expense tracking with rolling daily budgets
//!
//! A monthly budget is split evenly across the days of the month. Each day's
//! unspent allowance rolls into the next day; overspending is absorbed and
//! the next day starts from the flat daily share again. Credit cards are
//! tracked alongside, classified by how much of their limit is in use.
//!
//! # Architecture
//!
//! - `calendar`: month boundaries on plain calendar dates
//! - `models`: expenses, budgets, credit cards, payments, money and IDs
//! - `services`: the daily budget engine, status and utilization
//!   calculators, and the storage-backed services
//! - `storage`: JSON file storage with atomic writes
//! - `audit`: append-only log of every mutation
//! - `reports`, `display`, `cli`: terminal output and commands
//! - `config`, `logging`, `error`: paths, settings, diagnostics and errors
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tally::models::{ExpenseRecord, Money};
//! use tally::services::{calculate_daily_budget, format_budget_status};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 11, d).unwrap();
//! let expenses = [
//!     ExpenseRecord::new(day(1), Money::from_units(-8)),
//!     ExpenseRecord::new(day(2), Money::from_units(-5)),
//! ];
//! let info = calculate_daily_budget(Money::from_units(300), &expenses, day(2));
//! assert_eq!(format_budget_status(&info), "$7.00 available today (includes $2.00 rollover)");
//! ```

pub mod audit;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
