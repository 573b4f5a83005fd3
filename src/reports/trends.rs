//! Month-over-month spending trends
//!
//! Every comparison here works on expense totals only.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::models::{Money, MonthKey, Transaction};

use super::aggregation::{bucket_spending, MonthBucket};

/// Percentage change from `previous` to `current`; zero when there is no baseline
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Percentage change between two money amounts
pub fn money_change(current: Money, previous: Money) -> f64 {
    pct_change(current.as_decimal(), previous.as_decimal())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increased,
    Decreased,
    Unchanged,
}

impl TrendDirection {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Increased
        } else if change < 0.0 {
            Self::Decreased
        } else {
            Self::Unchanged
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increased => f.pad("increased"),
            Self::Decreased => f.pad("decreased"),
            Self::Unchanged => f.pad("remained the same"),
        }
    }
}

/// Change in one category's spending against the previous month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrend {
    pub category: String,
    pub current: Money,
    pub previous: Money,
    pub change: f64,
}

/// Spending summary of one month compared with the month before it
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyInsight {
    pub month: MonthKey,
    pub total_spent: Money,
    pub previous_total: Money,
    pub total_change: f64,
    pub category_trends: Vec<CategoryTrend>,
}

impl MonthlyInsight {
    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_change(self.total_change)
    }

    /// Human-readable lines for this month
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Total spending in {}: {}",
            self.month, self.total_spent
        )];

        for trend in &self.category_trends {
            lines.push(format!(
                "Spending on {} changed by {:.2}%.",
                trend.category, trend.change
            ));
        }

        lines.push(format!(
            "Total spending {} by {:.2}%.",
            self.direction(),
            self.total_change.abs()
        ));
        lines
    }
}

/// Compare each month with the previous month present in `grouped`
///
/// Months with no transactions are skipped rather than treated as zero, so
/// a month following a gap is compared with the last month that had data.
/// The first month has an empty baseline and therefore reports no change.
pub fn generate_monthly_insights(grouped: &BTreeMap<MonthKey, MonthBucket>) -> Vec<MonthlyInsight> {
    let mut insights = Vec::with_capacity(grouped.len());
    let mut previous: BTreeMap<String, Money> = BTreeMap::new();

    for (month, bucket) in grouped {
        let current = bucket_spending(bucket);

        let category_trends = current
            .iter()
            .filter_map(|(category, &amount)| {
                let before = previous.get(category).copied().unwrap_or_default();
                let change = money_change(amount, before);
                (change != 0.0).then(|| CategoryTrend {
                    category: category.clone(),
                    current: amount,
                    previous: before,
                    change,
                })
            })
            .collect();

        let total_spent: Money = current.values().sum();
        let previous_total: Money = previous.values().sum();

        insights.push(MonthlyInsight {
            month: *month,
            total_spent,
            previous_total,
            total_change: money_change(total_spent, previous_total),
            category_trends,
        });

        previous = current;
    }

    insights
}

/// How a category's spending moved between two compared months
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparisonNote {
    Changed(f64),
    /// Nothing was spent in the first month
    NewSpending,
    /// Nothing was spent in the second month
    Stopped,
}

impl fmt::Display for ComparisonNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed(change) => write!(f, "{:+.2}%", change),
            Self::NewSpending => f.write_str("New spending in this category"),
            Self::Stopped => f.write_str("No spending in this category for the second period"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparison {
    pub category: String,
    pub first: Money,
    pub second: Money,
    pub note: ComparisonNote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthComparison {
    pub first_month: MonthKey,
    pub second_month: MonthKey,
    pub first_total: Money,
    pub second_total: Money,
    pub rows: Vec<CategoryComparison>,
}

impl MonthComparison {
    pub fn total_change(&self) -> f64 {
        money_change(self.second_total, self.first_total)
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!(
            "Spending comparison: {} vs {}\n{}\n",
            self.first_month,
            self.second_month,
            "=".repeat(60)
        );

        if self.rows.is_empty() {
            output.push_str("No spending in either month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>12} {:>12}  {}\n",
            "Category",
            self.first_month.to_string(),
            self.second_month.to_string(),
            "Change"
        ));
        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>12} {:>12}  {}\n",
                row.category, row.first, row.second, row.note
            ));
        }
        output.push_str(&format!(
            "{:<20} {:>12} {:>12}  {:+.2}%\n",
            "Total",
            self.first_total,
            self.second_total,
            self.total_change()
        ));
        output
    }
}

fn month_spending(transactions: &[Transaction], month: MonthKey) -> BTreeMap<String, Money> {
    let mut spending: BTreeMap<String, Money> = BTreeMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date()))
    {
        *spending.entry(txn.category().to_lowercase()).or_default() += txn.amount();
    }
    spending
}

/// Expense totals of two arbitrary months, category by category
///
/// Category names are compared case-insensitively and reported in lower case.
pub fn compare_months(
    transactions: &[Transaction],
    first: MonthKey,
    second: MonthKey,
) -> MonthComparison {
    let first_spending = month_spending(transactions, first);
    let second_spending = month_spending(transactions, second);

    let categories: BTreeSet<&String> = first_spending.keys().chain(second_spending.keys()).collect();

    let rows = categories
        .into_iter()
        .map(|category| {
            let a = first_spending.get(category).copied().unwrap_or_default();
            let b = second_spending.get(category).copied().unwrap_or_default();
            let note = if a.is_zero() {
                ComparisonNote::NewSpending
            } else if b.is_zero() {
                ComparisonNote::Stopped
            } else {
                ComparisonNote::Changed(money_change(b, a))
            };
            CategoryComparison {
                category: category.clone(),
                first: a,
                second: b,
                note,
            }
        })
        .collect();

    MonthComparison {
        first_month: first,
        second_month: second,
        first_total: first_spending.values().sum(),
        second_total: second_spending.values().sum(),
        rows,
    }
}
