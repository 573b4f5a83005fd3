//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. The file is a
//! top-level JSON array kept in insertion order.

use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FinanceError;
use crate::models::{MonthKey, Transaction};

use super::file_io::{read_json_or_default, write_json_atomic};

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    ///
    /// A missing or corrupt file leaves the repository empty. Within a valid
    /// array, records that fail validation are logged and skipped so the rest
    /// of the history survives the next save.
    pub fn load(&self) -> Result<(), FinanceError> {
        let records: Vec<Value> = read_json_or_default(&self.path);
        let total = records.len();

        let transactions: Vec<Transaction> = records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| match serde_json::from_value(record) {
                Ok(txn) => Some(txn),
                Err(e) => {
                    warn!(
                        file = %self.path.display(),
                        index = idx,
                        error = %e,
                        "skipping invalid transaction record"
                    );
                    None
                }
            })
            .collect();

        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        debug!(count = transactions.len(), skipped = total - transactions.len(), "loaded transactions");
        *data = transactions;
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Get all transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get the most recent `limit` transactions, newest date first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<Transaction>, FinanceError> {
        let mut transactions = self.get_all()?;
        // Stable sort keeps later insertions after earlier ones on the same day
        transactions.reverse();
        transactions.sort_by(|a, b| b.date().cmp(&a.date()));
        transactions.truncate(limit);
        Ok(transactions)
    }

    /// Get transactions dated within the given month
    pub fn get_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>, FinanceError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| month.contains(t.date()))
            .collect())
    }

    /// Append a transaction
    pub fn append(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(txn);
        Ok(())
    }

    /// Append many transactions, preserving their order
    pub fn extend(&self, txns: Vec<Transaction>) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.extend(txns);
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(y: i32, m: u32, d: u32, category: &str, cents: i64) -> Transaction {
        Transaction::expense(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category,
            Money::from_cents(cents),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(expense(2025, 2, 1, "Rent", 100000)).unwrap();
        repo.append(expense(2025, 1, 15, "Food", 5000)).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category(), "Rent");
        assert_eq!(all[1].category(), "Food");
    }

    #[test]
    fn test_file_is_a_json_array() {
        let (temp_dir, repo) = create_test_repo();
        repo.append(expense(2025, 1, 15, "Food", 5000)).unwrap();
        repo.save().unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("transactions.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(temp_dir.path().join("transactions.json"), "{broken").unwrap();

        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_recent_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(2025, 1, 10, "A", 100)).unwrap();
        repo.append(expense(2025, 3, 10, "B", 100)).unwrap();
        repo.append(expense(2025, 2, 10, "C", 100)).unwrap();

        let recent = repo.get_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].category(), "B");
        assert_eq!(recent[1].category(), "C");
    }

    #[test]
    fn test_month_query() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(2025, 1, 10, "Food", 100)).unwrap();
        repo.append(expense(2025, 1, 31, "Food", 200)).unwrap();
        repo.append(expense(2025, 2, 1, "Food", 300)).unwrap();

        let january = repo.get_by_month(MonthKey::new(2025, 1)).unwrap();
        assert_eq!(january.len(), 2);
        assert!(repo.get_by_month(MonthKey::new(2025, 3)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_record_does_not_discard_the_rest() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("transactions.json");
        std::fs::write(
            &path,
            r#"[
                {"date": "2025-01-10", "category": "Food", "amount": 12.5, "type": "Expense"},
                {"date": "2025-01-11", "category": "Food", "amount": -3, "type": "Expense"},
                {"date": "2025-01-12", "category": "Salary", "amount": 1000, "type": "Income"}
            ]"#,
        )
        .unwrap();

        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].amount(), Money::from_cents(1250));
        assert_eq!(all[1].category(), "Salary");
    }
}
