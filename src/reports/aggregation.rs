//! Transaction aggregation
//!
//! Groups transactions by month and category. Income and expense are summed
//! into separate accumulators and never netted against each other; wherever
//! a report speaks of "spending" it means the expense total.

use std::collections::BTreeMap;

use crate::models::{Money, MonthKey, Transaction, TransactionType};

/// Income and expense totals for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub income: Money,
    pub expense: Money,
    /// Number of transactions that contributed
    pub count: usize,
}

impl CategoryTotals {
    pub fn add(&mut self, txn: &Transaction) {
        match txn.transaction_type() {
            TransactionType::Income => self.income += txn.amount(),
            TransactionType::Expense => self.expense += txn.amount(),
        }
        self.count += 1;
    }
}

/// Per-category totals within one month
pub type MonthBucket = BTreeMap<String, CategoryTotals>;

/// Partition transactions into `(year, month)` buckets, summing per category
pub fn group_by_month(transactions: &[Transaction]) -> BTreeMap<MonthKey, MonthBucket> {
    let mut grouped: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();

    for txn in transactions {
        grouped
            .entry(MonthKey::from_date(txn.date()))
            .or_default()
            .entry(txn.category().to_string())
            .or_default()
            .add(txn);
    }

    grouped
}

/// Expense total per category of a month bucket, skipping income-only categories
pub fn bucket_spending(bucket: &MonthBucket) -> BTreeMap<String, Money> {
    bucket
        .iter()
        .filter(|(_, totals)| !totals.expense.is_zero())
        .map(|(category, totals)| (category.clone(), totals.expense))
        .collect()
}

/// Total income, total expenses, and the balance between them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
}

pub fn calculate_summary(transactions: &[Transaction]) -> FinancialSummary {
    let mut summary = FinancialSummary::default();
    for txn in transactions {
        match txn.transaction_type() {
            TransactionType::Income => summary.total_income += txn.amount(),
            TransactionType::Expense => summary.total_expense += txn.amount(),
        }
    }
    summary.balance = summary.total_income - summary.total_expense;
    summary
}

/// All-time income and expense per category
pub fn category_breakdown(transactions: &[Transaction]) -> BTreeMap<String, CategoryTotals> {
    let mut breakdown: BTreeMap<String, CategoryTotals> = BTreeMap::new();
    for txn in transactions {
        breakdown
            .entry(txn.category().to_string())
            .or_default()
            .add(txn);
    }
    breakdown
}

/// All-time expense total per category
pub fn spending_by_category(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    let mut spending: BTreeMap<String, Money> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *spending.entry(txn.category().to_string()).or_default() += txn.amount();
    }
    spending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(date: &str, category: &str, units: i64, kind: TransactionType) -> Transaction {
        Transaction::new(
            crate::models::parse_date(date).unwrap(),
            category,
            Money::from_units(units),
            kind,
        )
        .unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("2024-01-05", "Food", 100, TransactionType::Expense),
            txn("2024-01-20", "Food", 50, TransactionType::Expense),
            txn("2024-01-31", "Salary", 2000, TransactionType::Income),
            txn("15/02/2024", "Food", 80, TransactionType::Expense),
            txn("2024-02-16", "Food", 30, TransactionType::Income),
            txn("2023-12-24", "Gifts", 200, TransactionType::Expense),
        ]
    }

    #[test]
    fn test_group_by_month_partitions_every_transaction() {
        let transactions = sample();
        let grouped = group_by_month(&transactions);

        let total_count: usize = grouped
            .values()
            .flat_map(|bucket| bucket.values())
            .map(|totals| totals.count)
            .sum();
        assert_eq!(total_count, transactions.len());

        let months: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(
            months,
            vec![
                MonthKey::new(2023, 12),
                MonthKey::new(2024, 1),
                MonthKey::new(2024, 2)
            ]
        );
    }

    #[test]
    fn test_group_by_month_merges_same_category() {
        let grouped = group_by_month(&sample());
        let january = &grouped[&MonthKey::new(2024, 1)];

        assert_eq!(january["Food"].expense, Money::from_units(150));
        assert_eq!(january["Food"].count, 2);
        assert_eq!(january["Salary"].income, Money::from_units(2000));
        assert_eq!(january["Salary"].expense, Money::zero());
    }

    #[test]
    fn test_income_and_expense_are_not_netted() {
        let grouped = group_by_month(&sample());
        let february = &grouped[&MonthKey::new(2024, 2)];

        assert_eq!(february["Food"].expense, Money::from_units(80));
        assert_eq!(february["Food"].income, Money::from_units(30));
    }

    #[test]
    fn test_bucket_sums_match_matching_transactions() {
        let transactions = sample();
        let grouped = group_by_month(&transactions);

        for (month, bucket) in &grouped {
            for (category, totals) in bucket {
                let expected: Money = transactions
                    .iter()
                    .filter(|t| month.contains(t.date()) && t.category() == category && t.is_expense())
                    .map(|t| t.amount())
                    .sum();
                assert_eq!(totals.expense, expected);
            }
        }
    }

    #[test]
    fn test_bucket_spending_skips_income_only_categories() {
        let grouped = group_by_month(&sample());
        let spending = bucket_spending(&grouped[&MonthKey::new(2024, 1)]);
        assert_eq!(spending.len(), 1);
        assert_eq!(spending["Food"], Money::from_units(150));
    }

    #[test]
    fn test_calculate_summary() {
        let summary = calculate_summary(&sample());
        assert_eq!(summary.total_income, Money::from_units(2030));
        assert_eq!(summary.total_expense, Money::from_units(430));
        assert_eq!(summary.balance, Money::from_units(1600));
    }

    #[test]
    fn test_breakdown_and_spending() {
        let transactions = sample();
        let breakdown = category_breakdown(&transactions);
        assert_eq!(breakdown["Food"].expense, Money::from_units(230));
        assert_eq!(breakdown["Food"].income, Money::from_units(30));

        let spending = spending_by_category(&transactions);
        assert_eq!(spending["Food"], Money::from_units(230));
        assert!(!spending.contains_key("Salary"));
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_month(&[]).is_empty());
        assert_eq!(calculate_summary(&[]), FinancialSummary::default());
    }
}
