use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_budget_command, handle_export_command, handle_goal_command, handle_import_command,
    handle_report_command, handle_transaction_command, BudgetCommands, GoalCommands, ReportCommands,
    Shell, TransactionCommands,
};
use fintrack::config::{FinancePaths, Settings};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "fintrack records income and expenses, tracks spending against \
                  category budgets, plans savings goals, and reports monthly \
                  spending trends from the command line."
)]
struct Cli {
    /// Directory holding settings, data files and the audit log
    #[arg(long, global = true, env = "FINTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Reports and spending analysis
    #[command(subcommand)]
    Report(ReportCommands),

    /// Import transactions from a CSV or JSON file
    Import {
        /// Path to the file
        file: PathBuf,
        /// csv or json (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export all transactions to a CSV or JSON file
    Export {
        /// Path to the file
        file: PathBuf,
        /// csv or json (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Start the interactive menu
    #[command(alias = "menu")]
    Shell,

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    fintrack::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Import { file, format }) => {
            handle_import_command(&storage, &file, format.as_deref())?
        }
        Some(Commands::Export { file, format }) => {
            handle_export_command(&storage, &file, format.as_deref())?
        }
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            Shell::new(&storage, &settings, stdin.lock(), io::stdout()).run()?;
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Alert threshold:     {:.0}%", settings.alert_threshold * 100.0);
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Recent transactions: {}", settings.recent_transactions);
        }
        Some(Commands::Audit { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack shell' for the interactive menu.");
        }
    }

    Ok(())
}
