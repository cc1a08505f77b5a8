//! Credit card display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{CreditCard, CreditCardPayment};
use crate::services::utilization::UtilizationResult;

use super::report::{format_bar, format_percentage};

const BAR_WIDTH: usize = 20;

/// Cards with utilization bars and tier messages, in the given order
pub fn format_utilization_list(
    overview: &[(CreditCard, UtilizationResult)],
    symbol: &str,
) -> String {
    if overview.is_empty() {
        return "No credit cards found.".to_string();
    }

    let name_width = overview
        .iter()
        .map(|(card, _)| card.to_string().chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for (card, utilization) in overview {
        output.push_str(&format!(
            "{:<name_width$}  {} {:>5}  {}\n",
            card.to_string(),
            format_bar(utilization.utilization_rate.min(100.0), 100.0, BAR_WIDTH),
            format_percentage(utilization.utilization_rate),
            utilization.tier.status_message(),
            name_width = name_width,
        ));
        output.push_str(&format!(
            "{:<name_width$}  {} of {} used, {} available  [{}]\n",
            "",
            card.current_balance.format_with_symbol(symbol),
            card.credit_limit.format_with_symbol(symbol),
            utilization.available_credit.format_with_symbol(symbol),
            card.id,
            name_width = name_width,
        ));
    }

    output
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Table of payments
pub fn format_payment_table(payments: &[CreditCardPayment], symbol: &str) -> String {
    if payments.is_empty() {
        return "No payments recorded.".to_string();
    }

    let rows = payments.iter().map(|payment| PaymentRow {
        id: payment.id.to_string(),
        date: payment.payment_date.to_string(),
        amount: payment.amount.format_with_symbol(symbol),
        note: payment.note.clone(),
    });

    Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string()
}
