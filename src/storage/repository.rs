//! Generic JSON repository
//!
//! Each entity type lives in its own JSON file as an array of records, loaded
//! into an in-memory map keyed by ID and written back atomically on save.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::audit::EntityType;
use crate::error::TallyError;
use crate::models::{
    Budget, BudgetId, CardId, CreditCard, CreditCardPayment, Expense, ExpenseId, PaymentId,
};

use super::file_io::{read_json, write_json_atomic};

/// An entity that can be stored in a [`JsonRepository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display;

    /// Audit log entity type
    const ENTITY: EntityType;

    fn id(&self) -> Self::Id;

    /// Whether a user-supplied identifier (full or short ID) refers to this record
    fn matches(&self, query: &str) -> bool;

    /// Human-readable label for audit entries
    fn label(&self) -> Option<String> {
        None
    }

    /// Listing order for `get_all` and the file on disk
    fn listing_order(a: &Self, b: &Self) -> Ordering;
}

impl Record for Expense {
    type Id = ExpenseId;
    const ENTITY: EntityType = EntityType::Expense;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn matches(&self, query: &str) -> bool {
        self.id.matches(query)
    }

    fn label(&self) -> Option<String> {
        Some(self.description.clone())
    }

    /// Newest date first, then newest entry first
    fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
    }
}

impl Record for Budget {
    type Id = BudgetId;
    const ENTITY: EntityType = EntityType::Budget;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn matches(&self, query: &str) -> bool {
        self.id.matches(query)
    }

    fn label(&self) -> Option<String> {
        Some(self.to_string())
    }

    /// Creation order, oldest first
    fn listing_order(a: &Self, b: &Self) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }
}

impl Record for CreditCard {
    type Id = CardId;
    const ENTITY: EntityType = EntityType::CreditCard;

    fn id(&self) -> CardId {
        self.id
    }

    /// Cards can also be referred to by name, case-insensitively
    fn matches(&self, query: &str) -> bool {
        self.id.matches(query) || self.card_name.eq_ignore_ascii_case(query.trim())
    }

    fn label(&self) -> Option<String> {
        Some(self.card_name.clone())
    }

    fn listing_order(a: &Self, b: &Self) -> Ordering {
        a.card_name
            .to_lowercase()
            .cmp(&b.card_name.to_lowercase())
            .then(a.created_at.cmp(&b.created_at))
    }
}

impl Record for CreditCardPayment {
    type Id = PaymentId;
    const ENTITY: EntityType = EntityType::Payment;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn matches(&self, query: &str) -> bool {
        self.id.matches(query)
    }

    fn label(&self) -> Option<String> {
        Some(format!("{} on {}", self.amount, self.payment_date))
    }

    fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.payment_date
            .cmp(&a.payment_date)
            .then(b.created_at.cmp(&a.created_at))
    }
}

/// Repository for one entity type backed by one JSON file
pub struct JsonRepository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> JsonRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, TallyError> {
        self.data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, TallyError> {
        self.data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory contents with the file's; a missing file is empty
    pub fn load(&self) -> Result<(), TallyError> {
        let records: Vec<T> = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        data.extend(records.into_iter().map(|r| (r.id(), r)));
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let records = self.get_all()?;
        write_json_atomic(&self.path, &records)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, TallyError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Look up a record by a user-supplied identifier
    ///
    /// Returns a validation error when a short ID matches more than one record.
    pub fn find(&self, query: &str) -> Result<Option<T>, TallyError> {
        let data = self.read()?;
        let mut matches = data.values().filter(|r| r.matches(query));

        let Some(first) = matches.next() else {
            return Ok(None);
        };
        if matches.next().is_some() {
            return Err(TallyError::Validation(format!(
                "'{}' matches more than one {}; use a longer ID",
                query,
                T::ENTITY
            )));
        }
        Ok(Some(first.clone()))
    }

    /// All records in listing order
    pub fn get_all(&self) -> Result<Vec<T>, TallyError> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by(T::listing_order);
        Ok(records)
    }

    /// Insert or replace a record
    pub fn upsert(&self, record: T) -> Result<(), TallyError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, TallyError> {
        Ok(self.write()?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        Ok(self.read()?.len())
    }
}
