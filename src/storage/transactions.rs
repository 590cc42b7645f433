//! Transaction input files
//!
//! Transactions are read from a JSON array or a CSV file with the header
//! `id,type,amount,category,description,date`. The format is picked from the
//! file extension. Every record is validated; the first bad record fails the
//! whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::file_io::read_json;
use crate::error::ReportError;
use crate::models::{Transaction, TransactionRecord};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(ReportError::Validation(format!(
                "Unsupported input file '{}': expected a .json or .csv file",
                path.display()
            ))),
        }
    }
}

/// Load and validate all transactions from a file
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, ReportError> {
    let path = path.as_ref();
    let records = match InputFormat::from_path(path)? {
        InputFormat::Json => read_json::<Vec<TransactionRecord>, _>(path)?,
        InputFormat::Csv => {
            let file = File::open(path).map_err(|e| {
                ReportError::Io(format!("Failed to open {}: {}", path.display(), e))
            })?;
            read_csv_records(file)?
        }
    };

    let transactions = records
        .into_iter()
        .map(Transaction::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Parse CSV records from any reader
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, row) in reader.deserialize::<TransactionRecord>().enumerate() {
        let record = row.map_err(|e| {
            // Line 1 is the header
            ReportError::Csv(format!("Row {}: {}", line + 2, e))
        })?;
        records.push(record);
    }
    Ok(records)
}
