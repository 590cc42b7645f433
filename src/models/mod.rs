//! Core data models
//!
//! This module contains the data structures the report engine reads:
//! money amounts, transactions and report periods.

pub mod money;
pub mod period;
pub mod transaction;

pub use money::{Money, NumberFormat};
pub use period::{PeriodError, PeriodType, ReportPeriod};
pub use transaction::{Transaction, TransactionRecord, TransactionType, RECORD_DATE_FORMAT};
