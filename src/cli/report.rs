//! Report CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::FinanceResult;
use crate::models::MonthKey;
use crate::reports::{compare_months, FinancialReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total income, expenses and balance
    Summary,

    /// Income and expense per category
    Breakdown,

    /// Share of total spending per category
    Spending,

    /// Month-over-month spending insights
    Insights,

    /// Compare spending between two months
    Compare {
        /// First month (YYYY-MM)
        first: String,
        /// Second month (YYYY-MM)
        second: String,
    },

    /// Write the complete report to a text file
    Write {
        /// Output file path
        #[arg(default_value = "financial_report.txt")]
        file: PathBuf,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, settings: &Settings, cmd: ReportCommands) -> FinanceResult<()> {
    let report = || FinancialReport::generate(storage, settings);

    match cmd {
        ReportCommands::Summary => print!("{}", report()?.format_summary()),
        ReportCommands::Breakdown => print!("{}", report()?.format_breakdown()),
        ReportCommands::Spending => print!("{}", report()?.format_spending()),
        ReportCommands::Insights => print!("{}", report()?.format_insights()),
        ReportCommands::Compare { first, second } => {
            let comparison = compare_months(
                &storage.transactions.get_all()?,
                MonthKey::parse(&first)?,
                MonthKey::parse(&second)?,
            );
            print!("{}", comparison.format_terminal());
        }
        ReportCommands::Write { file } => {
            report()?.write_to(&file)?;
            println!("Report written to {}", file.display());
        }
    }

    Ok(())
}
