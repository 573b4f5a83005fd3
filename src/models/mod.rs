//! Core data models for fintrack
//!
//! This module contains the data structures of the finance domain:
//! transactions, category budgets, savings goals and the money/date types
//! they are built from.

pub mod budget;
pub mod date;
pub mod money;
pub mod savings;
pub mod transaction;

pub use budget::{AlertStatus, Budget, BudgetAlert, BudgetEntry, BudgetPeriod};
pub use date::{parse_date, MonthKey};
pub use money::Money;
pub use savings::{SavingsGoal, SavingsGoalEntry};
pub use transaction::{Transaction, TransactionType};
