//! Reports module for fintrack
//!
//! Provides aggregation by month and category, month-over-month spending
//! trends, and the complete text report.

pub mod aggregation;
pub mod financial;
pub mod trends;

pub use aggregation::{
    bucket_spending, calculate_summary, category_breakdown, group_by_month, spending_by_category,
    CategoryTotals, FinancialSummary, MonthBucket,
};
pub use financial::{FinancialReport, GoalRow};
pub use trends::{
    compare_months, generate_monthly_insights, money_change, pct_change, CategoryComparison,
    CategoryTrend, ComparisonNote, MonthComparison, MonthlyInsight, TrendDirection,
};
