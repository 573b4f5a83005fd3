//! Storage layer for fintrack
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. All state lives in a [`Storage`] value that is passed to the
//! services; nothing is written until a repository's `save` is called.

pub mod budgets;
pub mod file_io;
pub mod savings;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, read_json_or_default, write_json_atomic};
pub use savings::SavingsRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancePaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub savings: SavingsRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            savings: SavingsRepository::new(paths.savings_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FinanceError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.savings.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.savings.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Result<(), FinanceError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Result<(), FinanceError> {
        self.audit
            .log(&AuditEntry::update(entity_type, entity_id, before, after, summary))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Result<(), FinanceError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity))
    }

    pub fn log_import(
        &self,
        source: impl Into<String>,
        imported: usize,
        skipped: usize,
    ) -> Result<(), FinanceError> {
        self.audit.log(&AuditEntry::import(source, imported, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_save_all_writes_every_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();

        storage.save_all().unwrap();

        assert!(paths.transactions_file().exists());
        assert!(paths.budgets_file().exists());
        assert!(paths.savings_file().exists());
    }
}
