//! finance-report - deterministic multi-page financial reports
//!
//! This library turns a snapshot of income and expense transactions into a
//! paginated report: header, summary cards and insights on the first page,
//! the transaction table from the second page, and a per-category breakdown
//! on its own page after that.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, transactions and report periods
//! - `reports`: Period statistics, category aggregation and report requests
//! - `render`: Drawing surface, document cursor, section renderers and assembly
//! - `display`: Text formatting and terminal tables
//! - `storage`: Transaction input files and atomic JSON writes
//! - `cli`: Command handlers for the `finreport` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_report::config::Settings;
//! use finance_report::models::{PeriodType, ReportPeriod};
//! use finance_report::render::{RecordingSurface, ReportAssembler};
//! use finance_report::reports::ReportRequest;
//!
//! let period = ReportPeriod::new(PeriodType::Month, 3, 2025)?;
//! let request = ReportRequest::for_period(&period, &transactions)?;
//! let mut surface = RecordingSurface::a4();
//! let report = ReportAssembler::new(Settings::default()).generate(&request, &mut surface)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod render;
pub mod reports;
pub mod storage;

pub use error::{ReportError, ReportResult};
pub use render::{GeneratedReport, ReportAssembler};
pub use reports::ReportRequest;
