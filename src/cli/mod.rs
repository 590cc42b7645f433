//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report engine.

pub mod config;
pub mod report;

pub use config::{handle_config, handle_init};
pub use report::{generate_to_dir, handle_generate, handle_summary, GenerateArgs, PeriodArgs};
