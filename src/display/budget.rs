//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{AlertStatus, Budget};
use crate::services::BudgetStatus;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Period")]
    period: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn format_budget_list(budgets: &[Budget], currency: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        category: b.category.clone(),
        limit: b.limit.format_with_symbol(currency),
        period: b.period.to_string(),
    });
    format!("{}\n", Table::new(rows).with(Style::psql()))
}

pub fn format_budget_status(rows: &[BudgetStatus], currency: &str) -> String {
    if rows.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows = rows.iter().map(|row| StatusRow {
        category: row.budget.category.clone(),
        limit: row.budget.limit.format_with_symbol(currency),
        spent: row.spent.format_with_symbol(currency),
        remaining: row.remaining.format_with_symbol(currency),
        used: format!("{:.1}%", row.utilization),
        status: match row.alert {
            None => "OK".to_string(),
            Some(AlertStatus::NearingLimit) => "Nearing limit".to_string(),
            Some(AlertStatus::OverLimit { overage }) => {
                format!("Over by {}", overage.format_with_symbol(currency))
            }
        },
    });
    format!("{}\n", Table::new(rows).with(Style::psql()))
}
