//! Custom error types for the report engine
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::render::surface::SurfaceError;

/// The main error type for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    /// A transaction in the request is malformed; raised before any drawing
    #[error("Invalid transaction '{transaction}': {reason}")]
    InputData { transaction: String, reason: String },

    /// The drawing surface failed; generation is abandoned
    #[error("Render surface error: {0}")]
    RenderSurface(#[from] SurfaceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for command arguments and settings
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ReportError {
    /// Create an input data error for the given transaction
    pub fn input_data(transaction: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputData {
            transaction: transaction.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an input data error
    pub fn is_input_data(&self) -> bool {
        matches!(self, Self::InputData { .. })
    }

    /// Check if this error came from the drawing surface
    pub fn is_render_surface(&self) -> bool {
        matches!(self, Self::RenderSurface(_))
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
