//! Budget repository for JSON storage
//!
//! budgets.json maps category name to `{amount, period}`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Budget, BudgetEntry};

use super::file_io::{read_json_or_default, write_json_atomic};

/// Repository for category budgets
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BTreeMap<String, BudgetEntry>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BTreeMap<String, BudgetEntry> = read_json_or_default(&self.path);

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *budgets = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*budgets)
    }

    pub fn get(&self, category: &str) -> Result<Option<Budget>, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .get(category)
            .map(|entry| Budget::from_entry(category, *entry)))
    }

    /// All budgets ordered by category name
    pub fn get_all(&self) -> Result<Vec<Budget>, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .iter()
            .map(|(category, entry)| Budget::from_entry(category.clone(), *entry))
            .collect())
    }

    /// Insert or replace the budget for its category, returning the previous one
    pub fn upsert(&self, budget: Budget) -> Result<Option<Budget>, FinanceError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let previous = budgets.insert(budget.category.clone(), budget.entry());
        Ok(previous.map(|entry| Budget::from_entry(budget.category, entry)))
    }

    pub fn delete(&self, category: &str) -> Result<Option<Budget>, FinanceError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets
            .remove(category)
            .map(|entry| Budget::from_entry(category, entry)))
    }
}
