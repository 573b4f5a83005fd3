//! User settings for fintrack
//!
//! Manages user preferences: the budget warning threshold, currency symbol,
//! date display format and how much of the history the report shows.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Fraction of a budget limit at which a category is "nearing limit"
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of transactions listed in the report's "recent" section
    #[serde(default = "default_recent_count")]
    pub recent_transactions: usize,
}

fn default_alert_threshold() -> f64 {
    0.9
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_count() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_threshold: default_alert_threshold(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_transactions: default_recent_count(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinanceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FinanceError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject thresholds outside (0, 1]
    pub fn validate(&self) -> Result<(), FinanceError> {
        if !(self.alert_threshold > 0.0 && self.alert_threshold <= 1.0) {
            return Err(FinanceError::Config(format!(
                "alert_threshold must be in (0, 1], got {}",
                self.alert_threshold
            )));
        }
        Ok(())
    }
}
