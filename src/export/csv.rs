//! CSV export
//!
//! Produces `date,category,amount,type` with amounts to two decimals.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Transaction;

pub const CSV_HEADER: [&str; 4] = ["date", "category", "amount", "type"];

/// Write transactions as CSV, one row per transaction
pub fn export_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> FinanceResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for txn in transactions {
        csv_writer.write_record([
            txn.date().format("%Y-%m-%d").to_string(),
            txn.category().to_string(),
            format!("{:.2}", txn.amount().as_decimal()),
            txn.transaction_type().to_string().to_lowercase(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, Money};

    #[test]
    fn test_csv_layout() {
        let transactions = vec![
            Transaction::expense(parse_date("2024-01-05").unwrap(), "Food", Money::from_cents(1250)).unwrap(),
            Transaction::income(parse_date("2024-01-31").unwrap(), "Pay, bonus", Money::from_units(100)).unwrap(),
        ];

        let mut buffer = Vec::new();
        export_transactions_csv(&transactions, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "date,category,amount,type");
        assert_eq!(lines[1], "2024-01-05,Food,12.50,expense");
        assert_eq!(lines[2], "2024-01-31,\"Pay, bonus\",100.00,income");
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut buffer = Vec::new();
        export_transactions_csv(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "date,category,amount,type\n");
    }
}
