//! Transaction model
//!
//! Represents a validated income or expense entry, plus the raw record shape
//! that transactions are read from before validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::money::Money;
use crate::error::ReportError;

/// Date format used by transaction records
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Label used in the rendered report
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Receita",
            Self::Expense => "Despesa",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// A financial transaction
///
/// Transactions are immutable once built; the report engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount in currency units (never negative)
    pub amount: Money,

    /// Category name
    pub category: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Transaction date
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction with a generated identifier
    pub fn new(
        kind: TransactionType,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    /// Set an explicit identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Check if this is an income transaction
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Check if this is an expense transaction
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.id.trim().is_empty() {
            return Err(ReportError::input_data(
                "(no id)",
                "transaction id cannot be empty",
            ));
        }

        if self.amount.is_negative() {
            return Err(ReportError::input_data(
                &self.id,
                format!("amount cannot be negative ({})", self.amount),
            ));
        }

        if self.category.trim().is_empty() {
            return Err(ReportError::input_data(&self.id, "category cannot be empty"));
        }

        Ok(())
    }
}

/// A transaction as it appears in an input file, before validation
///
/// Field names match both the JSON array format and the CSV header
/// `id,type,amount,category,description,date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub kind: String,

    pub amount: f64,

    pub category: String,

    #[serde(default)]
    pub description: String,

    pub date: String,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ReportError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let id = match record.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };

        let kind = record
            .kind
            .parse::<TransactionType>()
            .map_err(|reason| ReportError::input_data(&id, reason))?;

        if !record.amount.is_finite() {
            return Err(ReportError::input_data(&id, "amount is not a number"));
        }
        if record.amount < 0.0 {
            return Err(ReportError::input_data(
                &id,
                format!("amount cannot be negative ({})", record.amount),
            ));
        }

        let amount = Money::try_from_major(record.amount).ok_or_else(|| {
            ReportError::input_data(&id, format!("amount {} is out of range", record.amount))
        })?;

        let date = NaiveDate::parse_from_str(record.date.trim(), RECORD_DATE_FORMAT).map_err(|_| {
            ReportError::input_data(
                &id,
                format!("unparsable date '{}', expected YYYY-MM-DD", record.date),
            )
        })?;

        let txn = Transaction {
            id,
            kind,
            amount,
            category: record.category.trim().to_string(),
            description: record.description,
            date,
        };
        txn.validate()?;
        Ok(txn)
    }
}
