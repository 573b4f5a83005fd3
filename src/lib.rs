//! fintrack - personal finance tracking from the command line
//!
//! This library records income and expense transactions, tracks spending
//! against per-category budgets, plans savings goals, and produces monthly
//! spending reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, dates, transactions, budgets, goals)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Aggregation, trends and the text report
//! - `export`: CSV and JSON export
//! - `audit`: Audit logging system
//! - `display`: Terminal tables
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FinancePaths, Settings};
//! use fintrack::storage::Storage;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber
///
/// Logs go to stderr. `RUST_LOG` overrides the default `fintrack=warn` filter.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));

        // A subscriber installed by the embedding application wins
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
