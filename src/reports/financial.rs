//! Financial report
//!
//! Collects summary, breakdown, budget, savings and trend data in one pass
//! and renders it as plain text, either section by section for the terminal
//! or as a complete report file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetAlert, Money, Transaction};
use crate::services::{monthly_savings_needed, BudgetService, BudgetStatus, GoalProgress};
use crate::storage::Storage;

use super::aggregation::{calculate_summary, category_breakdown, group_by_month, CategoryTotals, FinancialSummary};
use super::trends::{generate_monthly_insights, MonthlyInsight};

const WIDTH: usize = 60;

/// A savings goal with its planned monthly contribution
#[derive(Debug, Clone)]
pub struct GoalRow {
    pub progress: GoalProgress,
    pub months: u32,
    /// `None` when the goal has no usable timeframe
    pub monthly: Option<Money>,
}

/// Everything the text report shows
#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub generated_on: NaiveDate,
    pub summary: FinancialSummary,
    pub breakdown: BTreeMap<String, CategoryTotals>,
    pub budgets: Vec<BudgetStatus>,
    pub alerts: Vec<BudgetAlert>,
    pub goals: Vec<GoalRow>,
    pub recent: Vec<Transaction>,
    pub insights: Vec<MonthlyInsight>,
    currency: String,
    date_format: String,
}

impl FinancialReport {
    /// Gather report data from storage
    pub fn generate(storage: &Storage, settings: &Settings) -> FinanceResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budget_service = BudgetService::new(storage);

        let goals = storage
            .savings
            .get_all()?
            .iter()
            .map(|goal| GoalRow {
                progress: GoalProgress::from(goal),
                months: goal.months,
                monthly: monthly_savings_needed(goal.target_amount, goal.months).ok(),
            })
            .collect();

        Ok(Self {
            generated_on: Local::now().date_naive(),
            summary: calculate_summary(&transactions),
            breakdown: category_breakdown(&transactions),
            budgets: budget_service.status(settings.alert_threshold, None)?,
            alerts: budget_service.alerts(settings.alert_threshold, None)?,
            goals,
            recent: storage.transactions.get_recent(settings.recent_transactions)?,
            insights: generate_monthly_insights(&group_by_month(&transactions)),
            currency: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }

    fn heading(title: &str) -> String {
        format!("{}\n{}\n", title, "-".repeat(WIDTH))
    }

    pub fn format_summary(&self) -> String {
        let mut output = Self::heading("FINANCIAL SUMMARY");
        output.push_str(&format!("{:<20} {:>15}\n", "Total Income:", self.money(self.summary.total_income)));
        output.push_str(&format!("{:<20} {:>15}\n", "Total Expenses:", self.money(self.summary.total_expense)));
        output.push_str(&format!("{:<20} {:>15}\n", "Balance:", self.money(self.summary.balance)));
        output
    }

    pub fn format_breakdown(&self) -> String {
        let mut output = Self::heading("CATEGORY BREAKDOWN");
        if self.breakdown.is_empty() {
            output.push_str("No transactions recorded.\n");
            return output;
        }

        output.push_str(&format!("{:<24} {:>12} {:>12} {:>6}\n", "Category", "Income", "Expense", "Count"));
        for (category, totals) in &self.breakdown {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>6}\n",
                category,
                self.money(totals.income),
                self.money(totals.expense),
                totals.count
            ));
        }
        output
    }

    /// Expense share of each category
    pub fn format_spending(&self) -> String {
        let mut output = Self::heading("SPENDING BY CATEGORY");
        let total = self.summary.total_expense;
        if total.is_zero() {
            output.push_str("No spending recorded.\n");
            return output;
        }

        let mut rows: Vec<(&String, Money)> = self
            .breakdown
            .iter()
            .filter(|(_, totals)| totals.expense.is_positive())
            .map(|(category, totals)| (category, totals.expense))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));

        for (category, amount) in rows {
            let share = amount.cents() as f64 / total.cents() as f64 * 100.0;
            output.push_str(&format!("{:<24} {:>12} {:>7.1}%\n", category, self.money(amount), share));
        }
        output.push_str(&format!("{:<24} {:>12}\n", "Total", self.money(total)));
        output
    }

    pub fn format_budgets(&self) -> String {
        let mut output = Self::heading("BUDGET STATUS");
        if self.budgets.is_empty() {
            output.push_str("No budgets set.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>11} {:>11} {:>11} {:>7}\n",
            "Category", "Limit", "Spent", "Remaining", "Used"
        ));
        for row in &self.budgets {
            output.push_str(&format!(
                "{:<18} {:>11} {:>11} {:>11} {:>6.1}%\n",
                row.budget.category,
                self.money(row.budget.limit),
                self.money(row.spent),
                self.money(row.remaining),
                row.utilization
            ));
        }

        if !self.alerts.is_empty() {
            output.push('\n');
            for alert in &self.alerts {
                output.push_str(&format!("{}\n", alert));
            }
        }
        output
    }

    pub fn format_goals(&self) -> String {
        let mut output = Self::heading("SAVINGS GOALS");
        if self.goals.is_empty() {
            output.push_str("No savings goals set.\n");
            return output;
        }

        for row in &self.goals {
            let goal = &row.progress;
            output.push_str(&format!(
                "{}: {} of {} saved ({:.1}%), {} to go\n",
                goal.name,
                self.money(goal.saved),
                self.money(goal.target_amount),
                goal.percent,
                self.money(goal.remaining)
            ));
            match row.monthly {
                Some(monthly) => output.push_str(&format!(
                    "  Save {} per month for {} months\n",
                    self.money(monthly),
                    row.months
                )),
                None => output.push_str("  No valid timeframe\n"),
            }
        }
        output
    }

    pub fn format_recent(&self) -> String {
        let mut output = Self::heading("RECENT TRANSACTIONS");
        if self.recent.is_empty() {
            output.push_str("No transactions recorded.\n");
            return output;
        }

        for txn in &self.recent {
            output.push_str(&format!(
                "{} | {:<20} | {:<7} | {:>12}\n",
                txn.date().format(&self.date_format),
                txn.category(),
                txn.transaction_type(),
                self.money(txn.amount())
            ));
        }
        output
    }

    pub fn format_insights(&self) -> String {
        let mut output = Self::heading("MONTHLY SPENDING SUMMARY");
        if self.insights.is_empty() {
            output.push_str("No spending recorded.\n");
            return output;
        }

        for insight in &self.insights {
            for line in insight.lines() {
                output.push_str(&line);
                output.push('\n');
            }
            output.push('\n');
        }
        output
    }

    /// The complete report
    pub fn format_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!("Financial Report, generated {}\n", self.generated_on));
        output.push_str(&"=".repeat(WIDTH));
        output.push_str("\n\n");

        let sections = [
            self.format_summary(),
            self.format_breakdown(),
            self.format_budgets(),
            self.format_goals(),
            self.format_recent(),
            self.format_insights(),
        ];
        output.push_str(&sections.join("\n"));
        output
    }

    /// Write the complete report to a text file
    pub fn write_to(&self, path: &Path) -> FinanceResult<()> {
        fs::write(path, self.format_text())
            .map_err(|e| FinanceError::Export(format!("Failed to write {}: {}", path.display(), e)))?;
        info!(file = %path.display(), "financial report written");
        Ok(())
    }
}
