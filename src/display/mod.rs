//! Display formatting for terminal output
//!
//! Renders transactions, budgets and savings goals as tables.

pub mod budget;
pub mod savings;
pub mod transaction;

pub use budget::{format_budget_list, format_budget_status};
pub use savings::{format_goal_list, format_recommendations};
pub use transaction::{format_add_outcome, format_transaction_table};
