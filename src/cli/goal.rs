//! Savings goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_goal_list, format_recommendations};
use crate::error::FinanceResult;
use crate::services::SavingsService;
use crate::storage::Storage;

use super::parse_amount;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create or replace a savings goal
    Set {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Months to reach the target
        months: u32,
    },

    /// Remove a savings goal
    Remove {
        /// Goal name
        name: String,
    },

    /// List all goals with their progress
    List,

    /// Show progress toward one goal
    Progress {
        /// Goal name
        name: String,
    },

    /// Show the monthly amount needed for every goal
    Recommend,
}

/// Handle a savings goal command
pub fn handle_goal_command(storage: &Storage, settings: &Settings, cmd: GoalCommands) -> FinanceResult<()> {
    let service = SavingsService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        GoalCommands::Set { name, target, months } => {
            let rec = service.set_goal(&name, parse_amount(&target)?, months)?;
            println!(
                "To save {} for '{}' in {} months, you need to save {} per month.",
                rec.target_amount.format_with_symbol(currency),
                rec.name,
                rec.months,
                rec.monthly.format_with_symbol(currency)
            );
        }

        GoalCommands::Remove { name } => {
            let removed = service.remove_goal(&name)?;
            println!("Removed savings goal '{}'", removed.name);
        }

        GoalCommands::List => {
            print!("{}", format_goal_list(&service.list()?, currency));
        }

        GoalCommands::Progress { name } => {
            let progress = service.progress(&name)?;
            println!("Goal:      {}", progress.name);
            println!("Target:    {}", progress.target_amount.format_with_symbol(currency));
            println!("Saved:     {}", progress.saved.format_with_symbol(currency));
            println!("Remaining: {}", progress.remaining.format_with_symbol(currency));
            println!("Progress:  {:.1}%", progress.percent);
        }

        GoalCommands::Recommend => {
            print!("{}", format_recommendations(&service.recommend_all()?, currency));
        }
    }

    Ok(())
}
