//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget_list, format_budget_status};
use crate::error::FinanceResult;
use crate::models::{BudgetPeriod, MonthKey};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending limit for a category
    Set {
        /// Category name
        category: String,
        /// Limit amount (e.g., "300" or "300.00")
        amount: String,
        /// monthly or weekly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Remove a category's budget
    Remove {
        /// Category name
        category: String,
    },

    /// List all budgets
    List,

    /// Show spending against every budget
    Status {
        /// Only count spending in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show categories nearing or over their limit
    Alerts {
        /// Only count spending in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let service = BudgetService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
        } => {
            let period: BudgetPeriod = period.parse()?;
            let budget = service.set_budget(&category, parse_amount(&amount)?, period)?;
            println!(
                "Budget for {} set to {} ({})",
                budget.category,
                budget.limit.format_with_symbol(currency),
                budget.period
            );
        }

        BudgetCommands::Remove { category } => {
            let removed = service.remove_budget(&category)?;
            println!("Removed budget for {}", removed.category);
        }

        BudgetCommands::List => {
            print!("{}", format_budget_list(&service.list()?, currency));
        }

        BudgetCommands::Status { month } => {
            let month = month.as_deref().map(MonthKey::parse).transpose()?;
            let rows = service.status(settings.alert_threshold, month)?;
            print!("{}", format_budget_status(&rows, currency));
        }

        BudgetCommands::Alerts { month } => {
            let month = month.as_deref().map(MonthKey::parse).transpose()?;
            let alerts = service.alerts(settings.alert_threshold, month)?;
            if alerts.is_empty() {
                println!("All categories are within budget.");
            }
            for alert in alerts {
                println!("{}", alert);
            }
        }
    }

    Ok(())
}
