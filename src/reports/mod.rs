//! Reports module
//!
//! Turns a transaction snapshot into the statistics a report is built from.

pub mod request;
pub mod stats;

pub use request::ReportRequest;
pub use stats::{
    aggregate, percentage_change, percentage_of, CategoryBreakdown, CategoryTotal, PeriodStats,
    PreviousPeriodStats,
};
