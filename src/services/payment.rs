//! Credit card payment service
//!
//! Recording a payment lowers the card's balance by the amount paid, floored
//! at zero. Deleting a payment does not restore the balance.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{CardId, CreditCard, CreditCardPayment, Money};
use crate::storage::Storage;

use super::credit_card::CreditCardService;

/// Service for credit card payments
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment to a card and reduce its balance
    ///
    /// Returns the payment and the updated card.
    pub fn record(
        &self,
        card_query: &str,
        amount: Money,
        payment_date: NaiveDate,
        note: Option<String>,
    ) -> TallyResult<(CreditCardPayment, CreditCard)> {
        if !amount.is_positive() {
            return Err(TallyError::Validation(
                "Payment amount must be positive".into(),
            ));
        }

        let before = CreditCardService::new(self.storage).require(card_query)?;

        let mut payment = CreditCardPayment::new(before.id, amount, payment_date);
        payment.note = note.unwrap_or_default().trim().to_string();

        let mut card = before.clone();
        let remaining = card.current_balance - amount;
        card.set_balance(if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        });

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;
        self.storage.log_create(&payment)?;

        self.storage.credit_cards.upsert(card.clone())?;
        self.storage.credit_cards.save()?;
        self.storage.log_update(&before, &card)?;

        info!(
            id = %payment.id,
            card = %card.card_name,
            amount = %amount,
            balance = %card.current_balance,
            "payment recorded"
        );
        Ok((payment, card))
    }

    pub fn delete(&self, query: &str) -> TallyResult<CreditCardPayment> {
        let payment = self
            .storage
            .payments
            .find(query)?
            .ok_or_else(|| TallyError::payment_not_found(query))?;

        self.storage.payments.delete(payment.id)?;
        self.storage.payments.save()?;
        self.storage.log_delete(&payment)?;

        info!(id = %payment.id, "payment deleted");
        Ok(payment)
    }

    /// All payments, newest first
    pub fn list(&self) -> TallyResult<Vec<CreditCardPayment>> {
        self.storage.payments.get_all()
    }

    pub fn list_for_card(&self, card_id: CardId) -> TallyResult<Vec<CreditCardPayment>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.credit_card_id == card_id)
            .collect())
    }

    pub fn total_paid(&self, card_id: CardId) -> TallyResult<Money> {
        Ok(self
            .list_for_card(card_id)?
            .iter()
            .map(|p| p.amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use crate::config::paths::TallyPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn nov(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    fn add_card(storage: &Storage, name: &str, balance: i64) -> CreditCard {
        CreditCardService::new(storage)
            .add(name, Money::from_units(1000), Money::from_units(balance), None)
            .unwrap()
    }

    #[test]
    fn test_record_reduces_balance() {
        let (_temp, storage) = create_test_storage();
        add_card(&storage, "Visa", 300);
        let service = PaymentService::new(&storage);

        let (payment, card) = service
            .record("Visa", Money::from_units(120), nov(5), Some(" autopay ".into()))
            .unwrap();
        assert_eq!(payment.note, "autopay");
        assert_eq!(card.current_balance, Money::from_units(180));

        let stored = storage.credit_cards.get(card.id).unwrap().unwrap();
        assert_eq!(stored.current_balance, Money::from_units(180));

        let entries = storage.audit().read_all().unwrap();
        let last_two: Vec<_> = entries[entries.len() - 2..]
            .iter()
            .map(|e| e.entity_type)
            .collect();
        assert_eq!(last_two, vec![EntityType::Payment, EntityType::CreditCard]);
    }

    #[test]
    fn test_overpayment_floors_balance_at_zero() {
        let (_temp, storage) = create_test_storage();
        add_card(&storage, "Visa", 50);
        let service = PaymentService::new(&storage);

        let (_, card) = service
            .record("Visa", Money::from_units(80), nov(5), None)
            .unwrap();
        assert_eq!(card.current_balance, Money::zero());
    }

    #[test]
    fn test_record_validates() {
        let (_temp, storage) = create_test_storage();
        add_card(&storage, "Visa", 50);
        let service = PaymentService::new(&storage);

        assert!(service
            .record("Visa", Money::zero(), nov(5), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .record("Amex", Money::from_units(5), nov(5), None)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_totals_per_card() {
        let (_temp, storage) = create_test_storage();
        let visa = add_card(&storage, "Visa", 500);
        let amex = add_card(&storage, "Amex", 500);
        let service = PaymentService::new(&storage);

        service.record("Visa", Money::from_units(100), nov(1), None).unwrap();
        service.record("Visa", Money::from_units(50), nov(9), None).unwrap();
        service.record("Amex", Money::from_units(10), nov(3), None).unwrap();

        assert_eq!(service.total_paid(visa.id).unwrap(), Money::from_units(150));
        assert_eq!(service.total_paid(amex.id).unwrap(), Money::from_units(10));

        let dates: Vec<_> = service
            .list_for_card(visa.id)
            .unwrap()
            .iter()
            .map(|p| p.payment_date)
            .collect();
        assert_eq!(dates, vec![nov(9), nov(1)]);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        add_card(&storage, "Visa", 500);
        let service = PaymentService::new(&storage);
        let (payment, _) = service
            .record("Visa", Money::from_units(100), nov(1), None)
            .unwrap();

        service.delete(&payment.id.to_string()).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service
            .delete(&payment.id.to_string())
            .unwrap_err()
            .is_not_found());
    }
}
