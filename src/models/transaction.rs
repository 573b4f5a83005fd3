//! Transaction model
//!
//! A transaction is an immutable record of money coming in or going out. The
//! amount is never negative; the direction is carried by [`TransactionType`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::date::serde_date;
use super::money::Money;
use crate::error::FinanceError;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FinanceError::MalformedRecord(format!(
                "Unknown transaction type '{}': expected Income or Expense",
                other
            ))),
        }
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// On-disk shape of a transaction; `transaction_type` is accepted for `type`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    #[serde(with = "serde_date")]
    date: NaiveDate,
    category: String,
    amount: Money,
    #[serde(rename = "type", alias = "transaction_type")]
    transaction_type: TransactionType,
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    date: NaiveDate,
    category: String,
    amount: Money,
    transaction_type: TransactionType,
}

impl Transaction {
    /// Create a transaction, validating the amount and category
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        transaction_type: TransactionType,
    ) -> Result<Self, FinanceError> {
        let category = category.into().trim().to_string();

        if category.is_empty() {
            return Err(FinanceError::Validation("Category cannot be empty".into()));
        }
        if amount.is_negative() {
            return Err(FinanceError::Validation(format!(
                "Amount cannot be negative: {}",
                amount
            )));
        }

        Ok(Self {
            date,
            category,
            amount,
            transaction_type,
        })
    }

    /// Shorthand for an expense
    pub fn expense(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
    ) -> Result<Self, FinanceError> {
        Self::new(date, category, amount, TransactionType::Expense)
    }

    /// Shorthand for an income
    pub fn income(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
    ) -> Result<Self, FinanceError> {
        Self::new(date, category, amount, TransactionType::Income)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type.is_expense()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}: {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.transaction_type,
            self.amount
        )
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = FinanceError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(
            record.date,
            record.category,
            record.amount,
            record.transaction_type,
        )
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        Self {
            date: txn.date,
            category: txn.category,
            amount: txn.amount,
            transaction_type: txn.transaction_type,
        }
    }
}
