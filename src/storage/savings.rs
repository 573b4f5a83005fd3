//! Savings goal repository for JSON storage
//!
//! savings_goals.json maps goal name to
//! `{target_amount, months_to_save, saved_amount}`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{SavingsGoal, SavingsGoalEntry};

use super::file_io::{read_json_or_default, write_json_atomic};

pub struct SavingsRepository {
    path: PathBuf,
    goals: RwLock<BTreeMap<String, SavingsGoalEntry>>,
}

impl SavingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BTreeMap<String, SavingsGoalEntry> = read_json_or_default(&self.path);

        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *goals = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*goals)
    }

    pub fn get(&self, name: &str) -> Result<Option<SavingsGoal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.get(name).map(|entry| SavingsGoal::from_entry(name, *entry)))
    }

    /// All goals ordered by name
    pub fn get_all(&self) -> Result<Vec<SavingsGoal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals
            .iter()
            .map(|(name, entry)| SavingsGoal::from_entry(name.clone(), *entry))
            .collect())
    }

    pub fn upsert(&self, goal: SavingsGoal) -> Result<(), FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.insert(goal.name.clone(), goal.entry());
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<Option<SavingsGoal>, FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(goals.remove(name).map(|entry| SavingsGoal::from_entry(name, entry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("savings_goals.json");
        let repo = SavingsRepository::new(path.clone());

        let mut goal = SavingsGoal::new("Vacation", Money::from_units(1200), 12).unwrap();
        goal.credit(Money::from_units(300));
        repo.upsert(goal.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = SavingsRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get("Vacation").unwrap(), Some(goal));
    }

    #[test]
    fn test_get_all_is_name_ordered() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SavingsRepository::new(temp_dir.path().join("savings_goals.json"));
        repo.upsert(SavingsGoal::new("Zoo trip", Money::from_units(10), 1).unwrap()).unwrap();
        repo.upsert(SavingsGoal::new("Bike", Money::from_units(10), 1).unwrap()).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Bike", "Zoo trip"]);
    }
}
