//! JSON export

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Transaction;

/// Write transactions as a pretty-printed JSON array
pub fn export_transactions_json<W: Write>(transactions: &[Transaction], mut writer: W) -> FinanceResult<()> {
    serde_json::to_writer_pretty(&mut writer, transactions)?;
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))
}
