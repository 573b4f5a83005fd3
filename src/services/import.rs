//! Import service
//!
//! Reads transactions from CSV or JSON files. Rows that cannot be parsed are
//! skipped and reported by row number; the rest of the file still imports.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::export::FileFormat;
use crate::models::{parse_date, Money, Transaction, TransactionType};
use crate::storage::Storage;

/// Column positions resolved from a CSV header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub category_column: usize,
    pub amount_column: usize,
    pub type_column: usize,
    /// Number of fields every row must have
    pub width: usize,
}

impl ColumnMapping {
    /// Locate the required columns by name, in any order
    ///
    /// The type column may be called `type` or `transaction_type`.
    pub fn from_headers(headers: &StringRecord) -> FinanceResult<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
                .ok_or_else(|| {
                    FinanceError::MalformedRecord(format!(
                        "CSV header is missing the '{}' column",
                        names[0]
                    ))
                })
        };

        Ok(Self {
            date_column: find(&["date"])?,
            category_column: find(&["category"])?,
            amount_column: find(&["amount"])?,
            type_column: find(&["type", "transaction_type"])?,
            width: headers.len(),
        })
    }

    fn parse_record(&self, record: &StringRecord) -> FinanceResult<Transaction> {
        if record.len() != self.width {
            return Err(FinanceError::MalformedRecord(format!(
                "expected {} fields, found {}",
                self.width,
                record.len()
            )));
        }

        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let date = parse_date(field(self.date_column))?;
        let amount = Money::parse(field(self.amount_column)).map_err(|e| {
            FinanceError::MalformedRecord(format!("invalid amount '{}': {}", field(self.amount_column), e))
        })?;
        if amount.is_negative() {
            return Err(FinanceError::MalformedRecord(format!(
                "amount cannot be negative: {}",
                amount
            )));
        }
        let kind: TransactionType = field(self.type_column).parse()?;

        Transaction::new(date, field(self.category_column), amount, kind)
    }
}

/// A row that was skipped during import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line (CSV) or element (JSON) number
    pub row: u64,
    pub message: String,
}

/// Transactions parsed from a file, with the rows that failed
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<RowError>,
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
}

/// Parse CSV text with a header row
pub fn parse_csv(content: &str) -> FinanceResult<ParsedImport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mapping = ColumnMapping::from_headers(reader.headers()?)?;
    let mut parsed = ParsedImport::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let row = e.position().map(|p| p.line()).unwrap_or_default();
                parsed.errors.push(RowError {
                    row,
                    message: format!("Error reading CSV record: {}", e),
                });
                continue;
            }
        };

        let row = record.position().map(|p| p.line()).unwrap_or_default();
        match mapping.parse_record(&record) {
            Ok(txn) => parsed.transactions.push(txn),
            Err(e) => parsed.errors.push(RowError {
                row,
                message: e.to_string(),
            }),
        }
    }

    Ok(parsed)
}

/// Parse a JSON array of transaction objects
pub fn parse_json(content: &str) -> FinanceResult<ParsedImport> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(FinanceError::Import(
            "Invalid JSON format: the data is not a list of transactions".into(),
        ));
    };

    let mut parsed = ParsedImport::default();
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(item) {
            Ok(txn) => parsed.transactions.push(txn),
            Err(e) => parsed.errors.push(RowError {
                row: idx as u64 + 1,
                message: e.to_string(),
            }),
        }
    }

    Ok(parsed)
}

/// Service for importing transaction files
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a file, taking the format from `format` or the file extension
    ///
    /// Successfully parsed rows are appended and saved together; imported
    /// incomes are not credited to savings goals.
    pub fn import_file(&self, path: &Path, format: Option<FileFormat>) -> FinanceResult<ImportResult> {
        let format = match format {
            Some(format) => format,
            None => FileFormat::from_path(path)?,
        };

        if !path.exists() {
            return Err(FinanceError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| FinanceError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let parsed = match format {
            FileFormat::Csv => parse_csv(&content)?,
            FileFormat::Json => parse_json(&content)?,
        };

        for error in &parsed.errors {
            warn!(row = error.row, error = %error.message, "skipping malformed record");
        }

        let result = ImportResult {
            imported: parsed.transactions.len(),
            skipped: parsed.errors.len(),
            errors: parsed.errors,
        };

        if result.imported > 0 {
            self.storage.transactions.extend(parsed.transactions)?;
            self.storage.transactions.save()?;
        }
        self.storage
            .log_import(path.display().to_string(), result.imported, result.skipped)?;

        info!(
            file = %path.display(),
            imported = result.imported,
            skipped = result.skipped,
            "import finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_csv_either_header_layout() {
        let a = "date,amount,category,type\n2024-01-05,12.50,Food,expense\n";
        let b = "date,category,amount,transaction_type\n05/01/2024,Food,12.50,Expense\n";

        let a = parse_csv(a).unwrap();
        let b = parse_csv(b).unwrap();
        assert_eq!(a.transactions, b.transactions);
        assert_eq!(a.transactions[0].amount(), Money::from_cents(1250));
    }

    #[test]
    fn test_parse_csv_skips_bad_rows() {
        let content = "date,category,amount,type\n\
                       2024-01-05,Food,10,expense\n\
                       not-a-date,Food,10,expense\n\
                       2024-01-06,Food,abc,expense\n\
                       2024-01-07,Food,-5,expense\n\
                       2024-01-08,Food,5,refund\n\
                       2024-01-09,Food\n\
                       2024-01-10,Salary,1000,income\n";

        let parsed = parse_csv(content).unwrap();
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.errors.len(), 5);
        assert_eq!(parsed.errors[0].row, 3);
        assert_eq!(parsed.transactions[1].category(), "Salary");
    }

    #[test]
    fn test_parse_csv_skips_unrepresentable_amounts() {
        let content = "date,category,amount,type\n\
                       2024-01-01,Food,100000000000000000,expense\n\
                       2024-01-02,Food,5,expense\n\
                       2024-01-03,Food,--5,expense\n\
                       2024-01-04,Food,$-3.50,expense\n";

        let parsed = parse_csv(content).unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].amount(), Money::from_units(5));
        let rows: Vec<u64> = parsed.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![2, 4, 5]);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let err = parse_csv("date,category,amount\n2024-01-05,Food,10\n").unwrap_err();
        assert!(matches!(err, FinanceError::MalformedRecord(_)));
    }

    #[test]
    fn test_parse_json_requires_array() {
        let err = parse_json(r#"{"date": "2024-01-05"}"#).unwrap_err();
        assert!(matches!(err, FinanceError::Import(_)));
    }

    #[test]
    fn test_parse_json_skips_invalid_elements() {
        let content = r#"[
            {"date": "2024-01-05", "category": "Food", "amount": 10, "type": "expense"},
            {"date": "2024-13-05", "category": "Food", "amount": 10, "type": "expense"},
            {"date": "2024-01-07", "category": "Pay", "amount": "2500.00", "transaction_type": "Income"}
        ]"#;

        let parsed = parse_json(content).unwrap();
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].row, 2);
        assert!(parsed.transactions[1].is_income());
    }

    #[test]
    fn test_import_file_appends_and_audits() {
        let (temp, storage) = create_test_storage();
        let file = temp.path().join("bank.csv");
        fs::write(
            &file,
            "date,category,amount,type\n2024-01-05,Food,10,expense\nbad,Food,1,expense\n",
        )
        .unwrap();

        let result = ImportService::new(&storage).import_file(&file, None).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(storage.transactions.count().unwrap(), 1);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].summary.as_deref(), Some("1 imported, 1 skipped"));
    }

    #[test]
    fn test_import_missing_file() {
        let (temp, storage) = create_test_storage();
        let err = ImportService::new(&storage)
            .import_file(&temp.path().join("missing.csv"), None)
            .unwrap_err();
        assert!(matches!(err, FinanceError::FileNotFound(_)));
    }

    #[test]
    fn test_import_unsupported_extension() {
        let (temp, storage) = create_test_storage();
        let file = temp.path().join("data.xml");
        fs::write(&file, "<xml/>").unwrap();

        let err = ImportService::new(&storage).import_file(&file, None).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidArgument(_)));
    }
}
