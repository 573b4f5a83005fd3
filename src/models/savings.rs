//! Savings goal model

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::FinanceError;

/// Stored form of a goal: the goal name is the map key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoalEntry {
    pub target_amount: Money,
    pub months_to_save: u32,
    #[serde(default)]
    pub saved_amount: Money,
}

/// A savings target to reach within a number of months
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingsGoal {
    pub name: String,
    pub target_amount: Money,
    pub months: u32,
    pub saved_amount: Money,
}

impl SavingsGoal {
    /// Create a goal with no progress
    pub fn new(name: impl Into<String>, target_amount: Money, months: u32) -> Result<Self, FinanceError> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(FinanceError::Validation("Goal name cannot be empty".into()));
        }
        if !target_amount.is_positive() {
            return Err(FinanceError::Validation(format!(
                "Target amount must be positive: {}",
                target_amount
            )));
        }
        if months == 0 {
            return Err(FinanceError::InvalidArgument(
                "Months to save must be greater than zero".into(),
            ));
        }

        Ok(Self {
            name,
            target_amount,
            months,
            saved_amount: Money::zero(),
        })
    }

    pub fn from_entry(name: impl Into<String>, entry: SavingsGoalEntry) -> Self {
        Self {
            name: name.into(),
            target_amount: entry.target_amount,
            months: entry.months_to_save,
            saved_amount: entry.saved_amount,
        }
    }

    pub fn entry(&self) -> SavingsGoalEntry {
        SavingsGoalEntry {
            target_amount: self.target_amount,
            months_to_save: self.months,
            saved_amount: self.saved_amount,
        }
    }

    /// Amount still needed, never below zero
    pub fn remaining(&self) -> Money {
        if self.saved_amount >= self.target_amount {
            Money::zero()
        } else {
            self.target_amount - self.saved_amount
        }
    }

    pub fn is_complete(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    /// Progress toward the target as a percentage (capped at 100)
    pub fn percent_complete(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 100.0;
        }
        let pct = self.saved_amount.cents() as f64 / self.target_amount.cents() as f64 * 100.0;
        pct.min(100.0)
    }

    /// Add up to `amount` toward the target; returns what was actually taken
    pub fn credit(&mut self, amount: Money) -> Money {
        let taken = amount.min(self.remaining());
        if taken.is_positive() {
            self.saved_amount += taken;
            taken
        } else {
            Money::zero()
        }
    }
}
