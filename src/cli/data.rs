//! Import and export commands

use std::path::Path;

use crate::error::FinanceResult;
use crate::export::{export_file, FileFormat};
use crate::services::ImportService;
use crate::storage::Storage;

/// Import transactions from a CSV or JSON file
pub fn handle_import_command(storage: &Storage, file: &Path, format: Option<&str>) -> FinanceResult<()> {
    let format = format.map(str::parse::<FileFormat>).transpose()?;
    let result = ImportService::new(storage).import_file(file, format)?;

    for error in &result.errors {
        println!("Skipping row {}: {}", error.row, error.message);
    }
    println!(
        "Imported {} transactions from {} ({} skipped)",
        result.imported,
        file.display(),
        result.skipped
    );
    Ok(())
}

/// Export all transactions to a CSV or JSON file
pub fn handle_export_command(storage: &Storage, file: &Path, format: Option<&str>) -> FinanceResult<()> {
    let format = format.map(str::parse::<FileFormat>).transpose()?;
    let count = export_file(storage, file, format)?;
    println!("Exported {} transactions to {}", count, file.display());
    Ok(())
}
