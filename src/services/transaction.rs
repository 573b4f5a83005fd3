//! Transaction service
//!
//! Records transactions and applies their side effects: an expense may
//! raise a budget alert for its category, an income is credited to the
//! savings goals.

use tracing::info;

use crate::audit::EntityType;
use crate::error::FinanceResult;
use crate::models::{BudgetAlert, MonthKey, Transaction};
use crate::services::budget::BudgetService;
use crate::services::savings::{GoalCredit, SavingsService};
use crate::storage::Storage;

/// What happened when a transaction was recorded
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub transaction: Transaction,
    /// Budget alert for the expense's category, if it reached the threshold
    pub alert: Option<BudgetAlert>,
    /// Goals credited from an income
    pub credits: Vec<GoalCredit>,
}

/// Filter for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub month: Option<MonthKey>,
    pub limit: Option<usize>,
}

/// Service for recording and querying transactions
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction and persist it
    pub fn add(&self, txn: Transaction, alert_threshold: f64) -> FinanceResult<AddOutcome> {
        self.storage.transactions.append(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage
            .log_create(EntityType::Transaction, txn.to_string(), &txn)?;

        info!(
            date = %txn.date(),
            category = txn.category(),
            amount = %txn.amount(),
            kind = %txn.transaction_type(),
            "transaction recorded"
        );

        let mut outcome = AddOutcome {
            transaction: txn,
            alert: None,
            credits: Vec::new(),
        };

        if outcome.transaction.is_expense() {
            outcome.alert = BudgetService::new(self.storage)
                .alert_for(outcome.transaction.category(), alert_threshold)?;
        } else {
            outcome.credits =
                SavingsService::new(self.storage).credit_income(outcome.transaction.amount())?;
        }

        Ok(outcome)
    }

    /// Transactions matching the filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FinanceResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_recent(usize::MAX)?;

        if let Some(category) = &filter.category {
            transactions.retain(|t| t.category().eq_ignore_ascii_case(category));
        }
        if let Some(month) = filter.month {
            transactions.retain(|t| month.contains(t.date()));
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    pub fn count(&self) -> FinanceResult<usize> {
        self.storage.transactions.count()
    }
}
