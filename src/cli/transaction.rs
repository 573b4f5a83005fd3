//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_add_outcome, format_transaction_table};
use crate::error::FinanceResult;
use crate::models::{MonthKey, Transaction, TransactionType};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount (e.g., "25" or "25.40")
        amount: String,
        /// Category name
        category: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Transaction date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            kind,
            date,
        } => {
            let kind: TransactionType = kind.parse()?;
            let txn = Transaction::new(
                parse_date_or_today(date.as_deref())?,
                category,
                parse_amount(&amount)?,
                kind,
            )?;

            let outcome = service.add(txn, settings.alert_threshold)?;
            print!("{}", format_add_outcome(&outcome));
        }

        TransactionCommands::List {
            category,
            month,
            limit,
        } => {
            let filter = TransactionFilter {
                category,
                month: month.as_deref().map(MonthKey::parse).transpose()?,
                limit,
            };
            let transactions = service.list(&filter)?;
            print!(
                "{}",
                format_transaction_table(&transactions, &settings.date_format, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
