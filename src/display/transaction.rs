//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;
use crate::services::AddOutcome;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table, using `date_format` for the date column
pub fn format_transaction_table(transactions: &[Transaction], date_format: &str, currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        date: txn.date().format(date_format).to_string(),
        category: txn.category().to_string(),
        kind: txn.transaction_type().to_string(),
        amount: txn.amount().format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(3), Alignment::right());
    format!("{}\n", table)
}

/// Describe the result of recording a transaction
pub fn format_add_outcome(outcome: &AddOutcome) -> String {
    let mut output = format!("Recorded: {}\n", outcome.transaction);

    if let Some(alert) = &outcome.alert {
        output.push_str(&format!("{}\n", alert));
    }
    for credit in &outcome.credits {
        output.push_str(&format!(
            "Added {} to savings goal '{}' (now {})\n",
            credit.credited, credit.name, credit.saved_amount
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, Money};

    #[test]
    fn test_table_contains_rows() {
        let transactions = vec![
            Transaction::expense(parse_date("2024-01-05").unwrap(), "Food", Money::from_cents(1250)).unwrap(),
        ];
        let output = format_transaction_table(&transactions, "%d/%m/%Y", "€");

        assert!(output.contains("Category"));
        assert!(output.contains("05/01/2024"));
        assert!(output.contains("€12.50"));
        assert!(output.contains("Expense"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "%Y-%m-%d", "$"), "No transactions found.\n");
    }
}
