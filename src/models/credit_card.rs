//! Credit card and card payment models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CardId, PaymentId};
use super::money::Money;

/// A credit card with a limit and a manually maintained balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CardId,

    pub card_name: String,

    /// Payment method label that expenses charged to this card carry
    #[serde(default)]
    pub payment_method: Option<String>,

    /// Credit limit (must be positive)
    pub credit_limit: Money,

    /// Amount currently owed (never negative)
    pub current_balance: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    pub fn new(card_name: impl Into<String>, credit_limit: Money, current_balance: Money) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            card_name: card_name.into(),
            payment_method: None,
            credit_limit,
            current_balance,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn set_balance(&mut self, balance: Money) {
        self.current_balance = balance;
        self.updated_at = Utc::now();
    }

    /// Validate the card
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.card_name.trim().is_empty() {
            return Err(CardValidationError::EmptyName);
        }
        if !self.credit_limit.is_positive() {
            return Err(CardValidationError::NonPositiveLimit);
        }
        if self.current_balance.is_negative() {
            return Err(CardValidationError::NegativeBalance);
        }
        Ok(())
    }
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payment_method {
            Some(method) => write!(f, "{} ({})", self.card_name, method),
            None => write!(f, "{}", self.card_name),
        }
    }
}

/// A payment made towards a credit card balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardPayment {
    pub id: PaymentId,

    pub credit_card_id: CardId,

    /// Amount paid (must be positive)
    pub amount: Money,

    pub payment_date: NaiveDate,

    #[serde(default)]
    pub note: String,

    pub created_at: DateTime<Utc>,
}

impl CreditCardPayment {
    pub fn new(credit_card_id: CardId, amount: Money, payment_date: NaiveDate) -> Self {
        Self {
            id: PaymentId::new(),
            credit_card_id,
            amount,
            payment_date,
            note: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Validation errors for credit cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    EmptyName,
    NonPositiveLimit,
    NegativeBalance,
}

impl fmt::Display for CardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Card name cannot be empty"),
            Self::NonPositiveLimit => write!(f, "Credit limit must be positive"),
            Self::NegativeBalance => write!(f, "Current balance cannot be negative"),
        }
    }
}

impl std::error::Error for CardValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card() {
        let card = CreditCard::new("Visa", Money::from_units(1000), Money::from_units(50))
            .with_payment_method("visa");
        assert!(card.validate().is_ok());
        assert_eq!(card.to_string(), "Visa (visa)");
    }

    #[test]
    fn test_card_validation() {
        let no_limit = CreditCard::new("Visa", Money::zero(), Money::zero());
        assert_eq!(
            no_limit.validate(),
            Err(CardValidationError::NonPositiveLimit)
        );

        let negative = CreditCard::new("Visa", Money::from_units(10), Money::from_cents(-1));
        assert_eq!(
            negative.validate(),
            Err(CardValidationError::NegativeBalance)
        );

        let unnamed = CreditCard::new(" ", Money::from_units(10), Money::zero());
        assert_eq!(unnamed.validate(), Err(CardValidationError::EmptyName));
    }

    #[test]
    fn test_payment() {
        let card = CreditCard::new("Visa", Money::from_units(1000), Money::zero());
        let date = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        let payment = CreditCardPayment::new(card.id, Money::from_units(25), date);
        assert_eq!(payment.credit_card_id, card.id);
        assert!(payment.note.is_empty());
    }
}
