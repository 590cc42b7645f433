//! Configuration module
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Page layout and number formatting preferences

pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::{LayoutSettings, Settings};
