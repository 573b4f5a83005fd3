//! Export module for fintrack
//!
//! Writes the transaction list to disk:
//! - CSV: `date,category,amount,type`, spreadsheet-compatible
//! - JSON: a pretty-printed array that `import` reads back unchanged

pub mod csv;
pub mod json;

pub use self::csv::export_transactions_csv;
pub use self::json::export_transactions_json;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::storage::Storage;

/// Transaction file formats understood by import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> FinanceResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for FileFormat {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(FinanceError::InvalidArgument(format!(
                "Unsupported file format '{}'. Please use 'csv' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.pad("csv"),
            Self::Json => f.pad("json"),
        }
    }
}

/// Write every stored transaction to `path`; returns how many were written
pub fn export_file(storage: &Storage, path: &Path, format: Option<FileFormat>) -> FinanceResult<usize> {
    let format = match format {
        Some(format) => format,
        None => FileFormat::from_path(path)?,
    };
    let transactions = storage.transactions.get_all()?;

    let file = File::create(path)
        .map_err(|e| FinanceError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        FileFormat::Csv => export_transactions_csv(&transactions, &mut writer)?,
        FileFormat::Json => export_transactions_json(&transactions, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    info!(file = %path.display(), %format, count = transactions.len(), "export finished");
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::{parse_date, Money, Transaction};
    use crate::services::import::ImportService;
    use tempfile::TempDir;

    fn storage_with(temp_dir: &TempDir, name: &str) -> Storage {
        let paths = FinancePaths::with_base_dir(temp_dir.path().join(name));
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::expense(parse_date("2024-01-05").unwrap(), "Food, groceries", Money::from_cents(1250)).unwrap(),
            Transaction::income(parse_date("2024-01-31").unwrap(), "Salary", Money::from_units(3000)).unwrap(),
            Transaction::expense(parse_date("2024-02-01").unwrap(), "Rent", Money::from_units(900)).unwrap(),
        ]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a.CSV")).unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert!(FileFormat::from_path(Path::new("a.txt")).unwrap_err().is_validation());
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_export_then_import_preserves_transactions() {
        let temp_dir = TempDir::new().unwrap();
        let source = storage_with(&temp_dir, "source");
        source.transactions.extend(sample()).unwrap();

        for name in ["out.csv", "out.json"] {
            let path = temp_dir.path().join(name);
            assert_eq!(export_file(&source, &path, None).unwrap(), 3);

            let target = storage_with(&temp_dir, &format!("{}-store", name));
            let result = ImportService::new(&target).import_file(&path, None).unwrap();
            assert_eq!(result.imported, 3);
            assert_eq!(result.skipped, 0);
            assert_eq!(target.transactions.get_all().unwrap(), sample());
        }
    }
}
