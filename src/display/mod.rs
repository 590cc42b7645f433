//! Display formatting for terminal output
//!
//! Provides text helpers shared with the document renderers and the tables
//! printed by the `summary` command.

pub mod format;
pub mod summary;

pub use format::{format_date, format_percentage, format_signed_percentage, slugify, truncate};
pub use summary::{format_breakdown_table, format_stats_table};
