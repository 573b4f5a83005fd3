//! Budget service
//!
//! Provides budget management and compares category spending against the
//! configured limits.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    AlertStatus, Budget, BudgetAlert, BudgetPeriod, Money, MonthKey, Transaction,
};
use crate::reports::aggregation::spending_by_category;
use crate::storage::Storage;

/// Compare spending against budgets
///
/// A category produces an alert once its spending reaches `threshold` of the
/// limit: `OverLimit` when spending is strictly above the limit, otherwise
/// `NearingLimit`. Categories without a budget or with nothing spent never
/// alert.
pub fn check_alerts(
    spending: &BTreeMap<String, Money>,
    budgets: &[Budget],
    threshold: f64,
) -> Vec<BudgetAlert> {
    budgets
        .iter()
        .filter_map(|budget| {
            let spent = spending.get(&budget.category).copied()?;
            alert_status(budget, spent, threshold).map(|status| BudgetAlert {
                category: budget.category.clone(),
                spent,
                limit: budget.limit,
                status,
            })
        })
        .collect()
}

fn alert_status(budget: &Budget, spent: Money, threshold: f64) -> Option<AlertStatus> {
    if spent.is_zero() {
        return None;
    }
    let warn_at = Money::from_cents((budget.limit.cents() as f64 * threshold).round() as i64);

    if spent > budget.limit {
        Some(AlertStatus::OverLimit {
            overage: spent - budget.limit,
        })
    } else if spent >= warn_at {
        Some(AlertStatus::NearingLimit)
    } else {
        None
    }
}

/// One budget with the spending recorded against it
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Money,
    pub remaining: Money,
    pub utilization: f64,
    pub alert: Option<AlertStatus>,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the budget for a category, replacing any existing one
    pub fn set_budget(
        &self,
        category: &str,
        limit: Money,
        period: BudgetPeriod,
    ) -> FinanceResult<Budget> {
        let budget = Budget::new(category, limit, period)?;

        let previous = self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        match previous {
            Some(before) => {
                self.storage.log_update(
                    EntityType::Budget,
                    &budget.category,
                    &before,
                    &budget,
                    Some(format!("limit: {} -> {}", before.limit, budget.limit)),
                )?;
            }
            None => {
                self.storage
                    .log_create(EntityType::Budget, &budget.category, &budget)?;
            }
        }

        info!(category = %budget.category, limit = %budget.limit, "budget set");
        Ok(budget)
    }

    /// Delete the budget for a category
    pub fn remove_budget(&self, category: &str) -> FinanceResult<Budget> {
        let removed = self
            .storage
            .budgets
            .delete(category)?
            .ok_or_else(|| FinanceError::budget_not_found(category))?;

        self.storage.budgets.save()?;
        self.storage
            .log_delete(EntityType::Budget, &removed.category, &removed)?;

        info!(category = %removed.category, "budget removed");
        Ok(removed)
    }

    /// All budgets ordered by category
    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    pub fn get(&self, category: &str) -> FinanceResult<Budget> {
        self.storage
            .budgets
            .get(category)?
            .ok_or_else(|| FinanceError::budget_not_found(category))
    }

    /// Percentage of a category's limit used by its recorded expenses
    pub fn utilization(&self, category: &str) -> FinanceResult<f64> {
        let budget = self.get(category)?;
        let spent = self.spending(None)?.get(category).copied().unwrap_or_default();
        Ok(budget.utilization(spent))
    }

    /// Status row for every budget
    ///
    /// With `month` set, only expenses dated in that month count as spent.
    pub fn status(&self, threshold: f64, month: Option<MonthKey>) -> FinanceResult<Vec<BudgetStatus>> {
        let spending = self.spending(month)?;

        let rows = self
            .list()?
            .into_iter()
            .map(|budget| {
                let spent = spending.get(&budget.category).copied().unwrap_or_default();
                BudgetStatus {
                    remaining: budget.remaining(spent),
                    utilization: budget.utilization(spent),
                    alert: alert_status(&budget, spent, threshold),
                    spent,
                    budget,
                }
            })
            .collect();

        Ok(rows)
    }

    /// Alerts for every budgeted category
    pub fn alerts(&self, threshold: f64, month: Option<MonthKey>) -> FinanceResult<Vec<BudgetAlert>> {
        let spending = self.spending(month)?;
        Ok(check_alerts(&spending, &self.list()?, threshold))
    }

    /// Alert for a single category, if it has a budget and has reached the threshold
    pub fn alert_for(&self, category: &str, threshold: f64) -> FinanceResult<Option<BudgetAlert>> {
        let Some(budget) = self.storage.budgets.get(category)? else {
            return Ok(None);
        };

        let spending = self.spending(None)?;
        let alert = check_alerts(&spending, std::slice::from_ref(&budget), threshold)
            .into_iter()
            .next();

        if let Some(alert) = &alert {
            debug!(category, status = ?alert.status, "budget alert raised");
        }
        Ok(alert)
    }

    fn spending(&self, month: Option<MonthKey>) -> FinanceResult<BTreeMap<String, Money>> {
        let transactions: Vec<Transaction> = match month {
            Some(month) => self.storage.transactions.get_by_month(month)?,
            None => self.storage.transactions.get_all()?,
        };
        Ok(spending_by_category(&transactions))
    }
}
