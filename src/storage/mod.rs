//! Storage layer
//!
//! Reads transaction input files and writes generated documents with atomic
//! JSON writes.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use transactions::{load_transactions, read_csv_records, InputFormat};
