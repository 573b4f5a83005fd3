//! Interactive menu
//!
//! A numbered menu that reads one answer per prompt. Errors from an action
//! are printed and the menu is shown again; `0` or end of input exits.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::config::Settings;
use crate::display::{format_add_outcome, format_recommendations, format_transaction_table};
use crate::error::{FinanceError, FinanceResult};
use crate::export::{export_file, FileFormat};
use crate::models::{BudgetPeriod, Transaction, TransactionType};
use crate::reports::FinancialReport;
use crate::services::{BudgetService, ImportService, SavingsService, TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

const MENU: &str = "\
Personal Finance Tracker
1. Add transaction
2. List recent transactions
3. Set budget
4. Check budget alerts
5. Set savings goal
6. Savings recommendations
7. Financial summary
8. Monthly spending insights
9. Import transactions
10. Export transactions
11. Write report
0. Exit";

/// Interactive session over arbitrary input and output streams
pub struct Shell<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            input,
            output,
        }
    }

    /// Run until the user chooses `0` or input ends
    pub fn run(&mut self) -> FinanceResult<()> {
        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option")? else {
                break;
            };
            debug!(choice = %choice, "menu selection");

            let result = match choice.as_str() {
                "0" => break,
                "1" => self.add_transaction(),
                "2" => self.list_transactions(),
                "3" => self.set_budget(),
                "4" => self.show_alerts(),
                "5" => self.set_goal(),
                "6" => self.show_recommendations(),
                "7" => self.show_summary(),
                "8" => self.show_insights(),
                "9" => self.import(),
                "10" => self.export(),
                "11" => self.write_report(),
                other => Err(FinanceError::InvalidArgument(format!(
                    "Invalid choice '{}', please try again",
                    other
                ))),
            };

            if let Err(e) = result {
                writeln!(self.output, "Error: {}", e)?;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> FinanceResult<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `prompt`, but end of input is an error
    fn ask(&mut self, label: &str) -> FinanceResult<String> {
        self.prompt(label)?
            .ok_or_else(|| FinanceError::InvalidArgument("Unexpected end of input".into()))
    }

    fn add_transaction(&mut self) -> FinanceResult<()> {
        let date = self.ask("Date (YYYY-MM-DD or DD/MM/YYYY, empty for today)")?;
        let category = self.ask("Category")?;
        let amount = parse_amount(&self.ask("Amount")?)?;
        let kind: TransactionType = self.ask("Type (income/expense)")?.parse()?;

        let txn = Transaction::new(parse_date_or_today(Some(&date))?, category, amount, kind)?;
        let outcome = TransactionService::new(self.storage).add(txn, self.settings.alert_threshold)?;
        write!(self.output, "{}", format_add_outcome(&outcome))?;
        Ok(())
    }

    fn list_transactions(&mut self) -> FinanceResult<()> {
        let filter = TransactionFilter {
            limit: Some(self.settings.recent_transactions),
            ..Default::default()
        };
        let transactions = TransactionService::new(self.storage).list(&filter)?;
        write!(
            self.output,
            "{}",
            format_transaction_table(&transactions, &self.settings.date_format, &self.settings.currency_symbol)
        )?;
        Ok(())
    }

    fn set_budget(&mut self) -> FinanceResult<()> {
        let category = self.ask("Category")?;
        let limit = parse_amount(&self.ask("Budget limit")?)?;

        let budget = BudgetService::new(self.storage).set_budget(&category, limit, BudgetPeriod::Monthly)?;
        writeln!(
            self.output,
            "Budget for {} set to {}",
            budget.category,
            budget.limit.format_with_symbol(&self.settings.currency_symbol)
        )?;
        Ok(())
    }

    fn show_alerts(&mut self) -> FinanceResult<()> {
        let alerts = BudgetService::new(self.storage).alerts(self.settings.alert_threshold, None)?;
        if alerts.is_empty() {
            writeln!(self.output, "All categories are within budget.")?;
        }
        for alert in alerts {
            writeln!(self.output, "{}", alert)?;
        }
        Ok(())
    }

    fn set_goal(&mut self) -> FinanceResult<()> {
        let name = self.ask("Goal name")?;
        let target = parse_amount(&self.ask("Target amount")?)?;
        let months: u32 = self
            .ask("Months to save")?
            .parse()
            .map_err(|_| FinanceError::InvalidArgument("Months must be a whole number".into()))?;

        let rec = SavingsService::new(self.storage).set_goal(&name, target, months)?;
        writeln!(
            self.output,
            "To reach '{}' you need to save {} per month.",
            rec.name,
            rec.monthly.format_with_symbol(&self.settings.currency_symbol)
        )?;
        Ok(())
    }

    fn show_recommendations(&mut self) -> FinanceResult<()> {
        let recs = SavingsService::new(self.storage).recommend_all()?;
        write!(
            self.output,
            "{}",
            format_recommendations(&recs, &self.settings.currency_symbol)
        )?;
        Ok(())
    }

    fn show_summary(&mut self) -> FinanceResult<()> {
        let report = FinancialReport::generate(self.storage, self.settings)?;
        write!(self.output, "{}", report.format_summary())?;
        Ok(())
    }

    fn show_insights(&mut self) -> FinanceResult<()> {
        let report = FinancialReport::generate(self.storage, self.settings)?;
        write!(self.output, "{}", report.format_insights())?;
        Ok(())
    }

    fn import(&mut self) -> FinanceResult<()> {
        let path = self.ask("File to import (.csv or .json)")?;
        let result = ImportService::new(self.storage).import_file(Path::new(&path), None)?;

        for error in &result.errors {
            writeln!(self.output, "Skipping row {}: {}", error.row, error.message)?;
        }
        writeln!(
            self.output,
            "Imported {} transactions ({} skipped)",
            result.imported, result.skipped
        )?;
        Ok(())
    }

    fn export(&mut self) -> FinanceResult<()> {
        let path = self.ask("File to export to (.csv or .json)")?;
        let format = FileFormat::from_path(Path::new(&path))?;
        let count = export_file(self.storage, Path::new(&path), Some(format))?;
        writeln!(self.output, "Exported {} transactions to {}", count, path)?;
        Ok(())
    }

    fn write_report(&mut self) -> FinanceResult<()> {
        let path = self.ask("Report file")?;
        let report = FinancialReport::generate(self.storage, self.settings)?;
        report.write_to(Path::new(&path))?;
        writeln!(self.output, "Report written to {}", path)?;
        Ok(())
    }
}
