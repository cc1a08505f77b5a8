//! Storage layer for Tally
//!
//! One JSON file per entity type under the data directory, plus the audit
//! log. Repositories are loaded into memory up front and saved after each
//! mutation.

pub mod file_io;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use repository::{JsonRepository, Record};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{Budget, CreditCard, CreditCardPayment, Expense};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TallyPaths,
    pub expenses: JsonRepository<Expense>,
    pub budgets: JsonRepository<Budget>,
    pub credit_cards: JsonRepository<CreditCard>,
    pub payments: JsonRepository<CreditCardPayment>,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage coordinator, creating directories as needed
    ///
    /// Nothing is read until [`Storage::load_all`].
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: JsonRepository::new(paths.expenses_file()),
            budgets: JsonRepository::new(paths.budgets_file()),
            credit_cards: JsonRepository::new(paths.credit_cards_file()),
            payments: JsonRepository::new(paths.payments_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open storage and load every repository
    pub fn open(paths: TallyPaths) -> Result<Self, TallyError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), TallyError> {
        self.expenses.load()?;
        self.budgets.load()?;
        self.credit_cards.load()?;
        self.payments.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), TallyError> {
        self.expenses.save()?;
        self.budgets.save()?;
        self.credit_cards.save()?;
        self.payments.save()?;
        Ok(())
    }

    pub fn log_create<T: Record>(&self, record: &T) -> Result<(), TallyError> {
        self.audit.log(&AuditEntry::create(
            T::ENTITY,
            record.id().to_string(),
            record.label(),
            record,
        ))
    }

    /// Log an update with a summary of the changed fields
    pub fn log_update<T: Record>(&self, before: &T, after: &T) -> Result<(), TallyError> {
        let diff = match (to_value(before), to_value(after)) {
            (Some(b), Some(a)) => generate_diff(&b, &a),
            _ => None,
        };

        self.audit.log(&AuditEntry::update(
            T::ENTITY,
            after.id().to_string(),
            after.label(),
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Record>(&self, record: &T) -> Result<(), TallyError> {
        self.audit.log(&AuditEntry::delete(
            T::ENTITY,
            record.id().to_string(),
            record.label(),
            record,
        ))
    }
}

fn to_value<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}
