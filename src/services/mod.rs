//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, side effects between entities, and audit logging.

pub mod budget;
pub mod import;
pub mod savings;
pub mod transaction;

pub use budget::{check_alerts, BudgetService, BudgetStatus};
pub use import::{ImportResult, ImportService, RowError};
pub use savings::{
    allocate_income, monthly_savings_needed, recommend, GoalCredit, GoalProgress, SavingsRecommendation,
    SavingsService,
};
pub use transaction::{AddOutcome, TransactionFilter, TransactionService};
