//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod data;
pub mod goal;
pub mod report;
pub mod shell;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use data::{handle_export_command, handle_import_command};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use shell::Shell;
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{parse_date, Money};

/// Parse a user-entered amount such as `12`, `12.5` or `$12.50`
pub fn parse_amount(input: &str) -> FinanceResult<Money> {
    Money::parse(input)
        .map_err(|e| FinanceError::Validation(format!("Invalid amount '{}': {}", input.trim(), e)))
}

/// Parse an optional date, defaulting to today
pub fn parse_date_or_today(input: Option<&str>) -> FinanceResult<NaiveDate> {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(date) => parse_date(date),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), Money::from_cents(1250));
        assert_eq!(parse_amount(" $40 ").unwrap(), Money::from_units(40));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
        assert!(parse_amount("$$40").unwrap_err().is_validation());
        assert!(parse_amount("$-3.50").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_or_today() {
        assert_eq!(
            parse_date_or_today(Some("2024-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(parse_date_or_today(Some("  ")).unwrap(), Local::now().date_naive());
        assert!(parse_date_or_today(Some("yesterday")).is_err());
    }
}
