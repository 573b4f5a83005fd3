//! Category budget model
//!
//! A budget caps the spending of one category. Budgets are keyed by category
//! name; setting a budget for a category that already has one replaces it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::FinanceError;

/// How often a budget limit resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.pad("monthly"),
            Self::Weekly => f.pad("weekly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "weekly" | "week" => Ok(Self::Weekly),
            other => Err(FinanceError::InvalidArgument(format!(
                "Invalid period '{}'. Please use 'monthly' or 'weekly'",
                other
            ))),
        }
    }
}

/// Stored form of a budget: the category is the map key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub amount: Money,
    #[serde(default)]
    pub period: BudgetPeriod,
}

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    pub category: String,
    pub limit: Money,
    pub period: BudgetPeriod,
}

impl Budget {
    /// Create a budget, rejecting negative limits and empty categories
    pub fn new(
        category: impl Into<String>,
        limit: Money,
        period: BudgetPeriod,
    ) -> Result<Self, FinanceError> {
        let category = category.into().trim().to_string();

        if category.is_empty() {
            return Err(FinanceError::Validation("Budget category cannot be empty".into()));
        }
        if limit.is_negative() {
            return Err(FinanceError::Validation(format!(
                "Budget limit cannot be negative: {}",
                limit
            )));
        }

        Ok(Self {
            category,
            limit,
            period,
        })
    }

    pub fn from_entry(category: impl Into<String>, entry: BudgetEntry) -> Self {
        Self {
            category: category.into(),
            limit: entry.amount,
            period: entry.period,
        }
    }

    pub fn entry(&self) -> BudgetEntry {
        BudgetEntry {
            amount: self.limit,
            period: self.period,
        }
    }

    /// Percentage of the limit used by `spent`; zero when the limit is zero
    pub fn utilization(&self, spent: Money) -> f64 {
        if self.limit.is_positive() {
            spent.cents() as f64 / self.limit.cents() as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Amount still available before the limit is reached (negative when over)
    pub fn remaining(&self, spent: Money) -> Money {
        self.limit - spent
    }
}

/// Outcome of comparing a category's spending against its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    /// Spending is at or above the warning threshold but within the limit
    NearingLimit,
    /// Spending exceeds the limit by `overage`
    OverLimit { overage: Money },
}

/// A budget alert for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: Money,
    pub limit: Money,
    pub status: AlertStatus,
}

impl fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            AlertStatus::NearingLimit => write!(
                f,
                "Warning: You're nearing the budget for {} ({} of {}).",
                self.category, self.spent, self.limit
            ),
            AlertStatus::OverLimit { overage } => write!(
                f,
                "Alert: You've exceeded the budget for {} by {}.",
                self.category, overage
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parsing() {
        assert_eq!("Monthly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Monthly);
        assert_eq!("weekly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
        assert!("yearly".parse::<BudgetPeriod>().is_err());
    }

    #[test]
    fn test_utilization() {
        let budget = Budget::new("Food", Money::from_units(200), BudgetPeriod::Monthly).unwrap();
        assert_eq!(budget.utilization(Money::from_units(50)), 25.0);
        assert_eq!(budget.remaining(Money::from_units(250)), Money::from_units(-50));

        let zero = Budget::new("Misc", Money::zero(), BudgetPeriod::Weekly).unwrap();
        assert_eq!(zero.utilization(Money::from_units(10)), 0.0);
    }

    #[test]
    fn test_negative_limit_rejected() {
        assert!(Budget::new("Food", Money::from_units(-1), BudgetPeriod::Monthly).is_err());
    }

    #[test]
    fn test_entry_json_shape() {
        let budget = Budget::new("Food", Money::from_units(300), BudgetPeriod::Weekly).unwrap();
        let json = serde_json::to_value(budget.entry()).unwrap();
        assert_eq!(json, serde_json::json!({"amount": 300, "period": "weekly"}));

        let entry: BudgetEntry = serde_json::from_str(r#"{"amount": 99.5}"#).unwrap();
        assert_eq!(entry.period, BudgetPeriod::Monthly);
        assert_eq!(entry.amount.cents(), 9950);
    }

    #[test]
    fn test_alert_display() {
        let alert = BudgetAlert {
            category: "Food".into(),
            spent: Money::from_units(120),
            limit: Money::from_units(100),
            status: AlertStatus::OverLimit {
                overage: Money::from_units(20),
            },
        };
        assert_eq!(
            alert.to_string(),
            "Alert: You've exceeded the budget for Food by $20.00."
        );
    }
}
