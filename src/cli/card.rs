//! Credit card CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_payment_table, format_utilization_list};
use crate::error::TallyResult;
use crate::services::{calculate_utilization, CreditCardService, PaymentService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

/// Credit card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a credit card
    Add {
        /// Card name
        name: String,
        /// Credit limit
        #[arg(short, long)]
        limit: String,
        /// Current balance owed
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Payment method label used on expenses charged to this card
        #[arg(short = 'm', long)]
        payment_method: Option<String>,
    },

    /// List cards by utilization, highest first
    List,

    /// Rename a card or change its limit or payment method
    Edit {
        /// Card name or ID
        card: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New credit limit
        #[arg(short, long)]
        limit: Option<String>,
        /// New payment method label
        #[arg(short = 'm', long, conflicts_with = "clear_method")]
        payment_method: Option<String>,
        /// Remove the payment method label
        #[arg(long)]
        clear_method: bool,
    },

    /// Overwrite a card's balance
    SetBalance {
        /// Card name or ID
        card: String,
        /// New balance
        amount: String,
    },

    /// Delete a card and its payments
    Delete {
        /// Card name or ID
        card: String,
    },

    /// Record a payment towards a card's balance
    Pay {
        /// Card name or ID
        card: String,
        /// Amount paid
        amount: String,
        /// Payment date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List payments, optionally for one card
    Payments {
        /// Card name or ID
        card: Option<String>,
    },
}

/// Handle a credit card command
pub fn handle_card_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CardCommands,
) -> TallyResult<()> {
    let cards = CreditCardService::new(storage);
    let payments = PaymentService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CardCommands::Add {
            name,
            limit,
            balance,
            payment_method,
        } => {
            let card = cards.add(
                &name,
                parse_amount(&limit)?,
                parse_amount(&balance)?,
                payment_method,
            )?;
            let utilization = calculate_utilization(&card);
            println!("Added card {} [{}]", card, card.id);
            println!(
                "  {:.1}% utilized: {}",
                utilization.utilization_rate,
                utilization.tier.status_message()
            );
        }

        CardCommands::List => {
            print!("{}", format_utilization_list(&cards.overview()?, symbol));
        }

        CardCommands::Edit {
            card,
            name,
            limit,
            payment_method,
            clear_method,
        } => {
            if name.is_none() && limit.is_none() && payment_method.is_none() && !clear_method {
                println!(
                    "No changes specified. Use --name, --limit, --payment-method or --clear-method."
                );
                return Ok(());
            }

            let limit = limit.as_deref().map(parse_amount).transpose()?;
            let payment_method = if clear_method {
                Some(None)
            } else {
                payment_method.map(Some)
            };
            let card = cards.update(&card, name.as_deref(), limit, payment_method)?;
            let utilization = calculate_utilization(&card);
            println!("Updated card {} [{}]", card, card.id);
            println!(
                "  {:.1}% utilized: {}",
                utilization.utilization_rate,
                utilization.tier.status_message()
            );
        }

        CardCommands::SetBalance { card, amount } => {
            let card = cards.set_balance(&card, parse_amount(&amount)?)?;
            println!(
                "{} balance set to {}",
                card.card_name,
                card.current_balance.format_with_symbol(symbol)
            );
        }

        CardCommands::Delete { card } => {
            let card = cards.delete(&card)?;
            println!("Deleted card {} [{}]", card.card_name, card.id);
        }

        CardCommands::Pay {
            card,
            amount,
            date,
            note,
        } => {
            let date = parse_date_or_today(date.as_deref())?;
            let (payment, card) = payments.record(&card, parse_amount(&amount)?, date, note)?;
            println!(
                "Paid {} to {} on {} [{}]; balance now {}",
                payment.amount.format_with_symbol(symbol),
                card.card_name,
                payment.payment_date,
                payment.id,
                card.current_balance.format_with_symbol(symbol)
            );
        }

        CardCommands::Payments { card: None } => {
            println!("{}", format_payment_table(&payments.list()?, symbol));
        }

        CardCommands::Payments { card: Some(query) } => {
            let card = cards.require(&query)?;
            println!("Payments to {}", card.card_name);
            println!(
                "{}",
                format_payment_table(&payments.list_for_card(card.id)?, symbol)
            );
            println!(
                "Total paid: {}",
                payments.total_paid(card.id)?.format_with_symbol(symbol)
            );
            if card.payment_method.is_some() {
                println!(
                    "Tracked charges less payments: {} (balance on file: {})",
                    cards.net_balance(&card)?.format_with_symbol(symbol),
                    card.current_balance.format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
