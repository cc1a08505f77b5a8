//! Credit card service
//!
//! Card CRUD, utilization overview and balance reconciliation against the
//! charges and payments on record.

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{CreditCard, Money};
use crate::storage::Storage;

use super::utilization::{calculate_net_balance, utilization_overview, UtilizationResult};

/// Service for credit card management
pub struct CreditCardService<'a> {
    storage: &'a Storage,
}

impl<'a> CreditCardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a card
    ///
    /// Card names are unique, case-insensitively.
    pub fn add(
        &self,
        name: &str,
        credit_limit: Money,
        current_balance: Money,
        payment_method: Option<String>,
    ) -> TallyResult<CreditCard> {
        let name = name.trim();
        if self.find(name)?.is_some() {
            return Err(TallyError::Validation(format!(
                "A credit card named '{}' already exists",
                name
            )));
        }

        let mut card = CreditCard::new(name, credit_limit, current_balance);
        if let Some(method) = payment_method.filter(|m| !m.trim().is_empty()) {
            card = card.with_payment_method(method.trim());
        }
        card.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.credit_cards.upsert(card.clone())?;
        self.storage.credit_cards.save()?;
        self.storage.log_create(&card)?;

        info!(id = %card.id, name = %card.card_name, "credit card added");
        Ok(card)
    }

    /// Rename a card or change its limit or payment method
    ///
    /// `payment_method` of `Some(None)` clears the method.
    pub fn update(
        &self,
        query: &str,
        name: Option<&str>,
        credit_limit: Option<Money>,
        payment_method: Option<Option<String>>,
    ) -> TallyResult<CreditCard> {
        let before = self.require(query)?;
        let mut card = before.clone();

        if let Some(name) = name {
            let name = name.trim();
            if let Some(other) = self.find(name)? {
                if other.id != card.id {
                    return Err(TallyError::Validation(format!(
                        "A credit card named '{}' already exists",
                        name
                    )));
                }
            }
            card.card_name = name.to_string();
        }
        if let Some(limit) = credit_limit {
            card.credit_limit = limit;
        }
        if let Some(method) = payment_method {
            card.payment_method = method
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty());
        }
        card.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;
        card.updated_at = chrono::Utc::now();

        self.storage.credit_cards.upsert(card.clone())?;
        self.storage.credit_cards.save()?;
        self.storage.log_update(&before, &card)?;

        info!(id = %card.id, name = %card.card_name, "credit card updated");
        Ok(card)
    }

    /// Overwrite a card's balance
    pub fn set_balance(&self, query: &str, balance: Money) -> TallyResult<CreditCard> {
        let before = self.require(query)?;

        let mut card = before.clone();
        card.set_balance(balance);
        card.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.credit_cards.upsert(card.clone())?;
        self.storage.credit_cards.save()?;
        self.storage.log_update(&before, &card)?;

        info!(id = %card.id, balance = %card.current_balance, "credit card balance set");
        Ok(card)
    }

    /// Delete a card and the payments recorded against it
    pub fn delete(&self, query: &str) -> TallyResult<CreditCard> {
        let card = self.require(query)?;

        let payments: Vec<_> = self
            .storage
            .payments
            .get_all()?
            .into_iter()
            .filter(|p| p.credit_card_id == card.id)
            .collect();
        for payment in &payments {
            self.storage.payments.delete(payment.id)?;
            self.storage.log_delete(payment)?;
        }
        self.storage.payments.save()?;

        self.storage.credit_cards.delete(card.id)?;
        self.storage.credit_cards.save()?;
        self.storage.log_delete(&card)?;

        info!(id = %card.id, payments = payments.len(), "credit card deleted");
        Ok(card)
    }

    /// Find a card by ID or name
    pub fn find(&self, query: &str) -> TallyResult<Option<CreditCard>> {
        self.storage.credit_cards.find(query)
    }

    pub(crate) fn require(&self, query: &str) -> TallyResult<CreditCard> {
        self.find(query)?
            .ok_or_else(|| TallyError::card_not_found(query))
    }

    /// All cards, by name
    pub fn list(&self) -> TallyResult<Vec<CreditCard>> {
        self.storage.credit_cards.get_all()
    }

    /// Cards with their utilization, highest rate first
    pub fn overview(&self) -> TallyResult<Vec<(CreditCard, UtilizationResult)>> {
        Ok(utilization_overview(&self.list()?))
    }

    /// Balance implied by tracked charges minus recorded payments
    pub fn net_balance(&self, card: &CreditCard) -> TallyResult<Money> {
        let expenses = self.storage.expenses.get_all()?;
        let payments = self.storage.payments.get_all()?;
        Ok(calculate_net_balance(card, &expenses, &payments))
    }
}
