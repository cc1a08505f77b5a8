//! Credit utilization classification
//!
//! Derives a utilization rate and risk tier from a card's balance and limit,
//! plus helpers that reconcile a card's balance from charges and payments.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{CreditCard, CreditCardPayment, Expense, Money};

/// Rates below this (percent) are excellent
pub const EXCELLENT_BELOW: f64 = 10.0;

/// Rates below this (percent) are good
pub const GOOD_BELOW: f64 = 30.0;

/// Credit health tier derived from the utilization rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationTier {
    Excellent,
    Good,
    Poor,
}

impl UtilizationTier {
    /// Tier for a utilization rate in percent
    pub fn from_rate(rate: f64) -> Self {
        if rate < EXCELLENT_BELOW {
            Self::Excellent
        } else if rate < GOOD_BELOW {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn status_message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent utilization",
            Self::Good => "Good utilization",
            Self::Poor => "High utilization - pay down immediately",
        }
    }
}

impl fmt::Display for UtilizationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Utilization figures for one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationResult {
    /// `current_balance / credit_limit * 100`, unrounded
    pub utilization_rate: f64,
    pub available_credit: Money,
    pub tier: UtilizationTier,
}

/// Classify a card's utilization
///
/// The card's limit must be positive; card validation guarantees this for
/// stored cards.
pub fn calculate_utilization(card: &CreditCard) -> UtilizationResult {
    let utilization_rate = card.current_balance.as_units() / card.credit_limit.as_units() * 100.0;

    UtilizationResult {
        utilization_rate,
        available_credit: card.credit_limit - card.current_balance,
        tier: UtilizationTier::from_rate(utilization_rate),
    }
}

/// Cards paired with their utilization, highest rate first
pub fn utilization_overview(cards: &[CreditCard]) -> Vec<(CreditCard, UtilizationResult)> {
    let mut overview: Vec<_> = cards
        .iter()
        .map(|card| (card.clone(), calculate_utilization(card)))
        .collect();
    overview.sort_by(|a, b| b.1.utilization_rate.total_cmp(&a.1.utilization_rate));
    overview
}

/// Balance implied by charges on the card's payment method minus payments to
/// the card, floored at zero
pub fn calculate_net_balance(
    card: &CreditCard,
    expenses: &[Expense],
    payments: &[CreditCardPayment],
) -> Money {
    let total_charges = total_charges(card, expenses);

    let total_payments: Money = payments
        .iter()
        .filter(|p| p.credit_card_id == card.id)
        .map(|p| p.amount)
        .sum();

    let net = total_charges - total_payments;
    if net.is_negative() {
        Money::zero()
    } else {
        net
    }
}

/// Total charged to a card, matched on its payment method
pub fn total_charges(card: &CreditCard, expenses: &[Expense]) -> Money {
    let Some(method) = card.payment_method.as_deref() else {
        return Money::zero();
    };

    expenses
        .iter()
        .filter(|e| e.payment_method.as_deref() == Some(method))
        .map(|e| e.amount)
        .sum::<Money>()
        .abs()
}

/// Distinct payment methods seen on expenses, sorted
pub fn payment_methods_from_expenses(expenses: &[Expense]) -> Vec<String> {
    expenses
        .iter()
        .filter_map(|e| e.payment_method.clone())
        .filter(|m| !m.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn card(balance: i64) -> CreditCard {
        CreditCard::new("Visa", Money::from_units(1000), Money::from_units(balance))
            .with_payment_method("visa")
    }

    fn charge(units: i64, method: Option<&str>) -> Expense {
        let mut expense = Expense::new(
            NaiveDate::from_ymd_opt(2024, 11, 3).unwrap(),
            Money::from_units(-units),
            "Purchase",
            "Shopping",
        );
        expense.payment_method = method.map(str::to_string);
        expense
    }

    #[test]
    fn test_excellent_utilization() {
        let result = calculate_utilization(&card(50));
        assert_eq!(result.utilization_rate, 5.0);
        assert_eq!(result.available_credit, Money::from_units(950));
        assert_eq!(result.tier, UtilizationTier::Excellent);
    }

    #[test]
    fn test_poor_utilization() {
        let result = calculate_utilization(&card(400));
        assert_eq!(result.utilization_rate, 40.0);
        assert_eq!(result.tier, UtilizationTier::Poor);
        assert_eq!(
            result.tier.status_message(),
            "High utilization - pay down immediately"
        );
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(UtilizationTier::from_rate(9.99), UtilizationTier::Excellent);
        assert_eq!(UtilizationTier::from_rate(10.0), UtilizationTier::Good);
        assert_eq!(UtilizationTier::from_rate(29.99), UtilizationTier::Good);
        assert_eq!(UtilizationTier::from_rate(30.0), UtilizationTier::Poor);
        assert_eq!(UtilizationTier::from_rate(120.0), UtilizationTier::Poor);
    }

    #[test]
    fn test_over_limit_has_negative_available_credit() {
        let result = calculate_utilization(&card(1200));
        assert_eq!(result.available_credit, Money::from_units(-200));
        assert_eq!(result.utilization_rate, 120.0);
    }

    #[test]
    fn test_overview_sorted_by_rate() {
        let cards = vec![card(50), card(400), card(200)];
        let overview = utilization_overview(&cards);
        let rates: Vec<f64> = overview.iter().map(|(_, u)| u.utilization_rate).collect();
        assert_eq!(rates, vec![40.0, 20.0, 5.0]);
    }

    #[test]
    fn test_net_balance() {
        let visa = card(0);
        let expenses = vec![
            charge(120, Some("visa")),
            charge(30, Some("visa")),
            charge(999, Some("cash")),
            charge(5, None),
        ];
        let payments = vec![
            CreditCardPayment::new(
                visa.id,
                Money::from_units(100),
                NaiveDate::from_ymd_opt(2024, 11, 10).unwrap(),
            ),
            CreditCardPayment::new(
                card(0).id,
                Money::from_units(500),
                NaiveDate::from_ymd_opt(2024, 11, 10).unwrap(),
            ),
        ];

        assert_eq!(total_charges(&visa, &expenses), Money::from_units(150));
        assert_eq!(
            calculate_net_balance(&visa, &expenses, &payments),
            Money::from_units(50)
        );
    }

    #[test]
    fn test_net_balance_floors_at_zero() {
        let visa = card(0);
        let payments = vec![CreditCardPayment::new(
            visa.id,
            Money::from_units(100),
            NaiveDate::from_ymd_opt(2024, 11, 10).unwrap(),
        )];
        assert_eq!(
            calculate_net_balance(&visa, &[charge(20, Some("visa"))], &payments),
            Money::zero()
        );
    }

    #[test]
    fn test_payment_methods() {
        let expenses = vec![
            charge(1, Some("visa")),
            charge(1, Some("amex")),
            charge(1, Some("visa")),
            charge(1, None),
        ];
        assert_eq!(payment_methods_from_expenses(&expenses), vec!["amex", "visa"]);
    }
}
