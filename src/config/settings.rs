//! User settings for the report engine
//!
//! Manages page layout, number and date formatting, and where generated
//! documents are written.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::display::format::format_date;
use crate::error::ReportError;
use crate::models::NumberFormat;
use crate::render::summary::CARDS_BLOCK_HEIGHT;

/// Tallest block a section reserves in one piece; every page must fit it
/// between the top margin and the footer reserve
pub const MIN_CONTENT_HEIGHT: f64 = CARDS_BLOCK_HEIGHT;

/// Page geometry used when laying out a report
///
/// Units follow the drawing surface; the defaults are A4 portrait in
/// millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_page_width")]
    pub page_width: f64,

    #[serde(default = "default_page_height")]
    pub page_height: f64,

    /// Left, right and top margin
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Space kept free at the bottom of every page
    #[serde(default = "default_footer_reserve")]
    pub footer_reserve: f64,

    /// Draw a page number and confidentiality line at the bottom of each page
    #[serde(default)]
    pub page_footer: bool,
}

fn default_page_width() -> f64 {
    210.0
}

fn default_page_height() -> f64 {
    297.0
}

fn default_margin() -> f64 {
    20.0
}

fn default_footer_reserve() -> f64 {
    30.0
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin: default_margin(),
            footer_reserve: default_footer_reserve(),
            page_footer: false,
        }
    }
}

impl LayoutSettings {
    /// Check that the geometry leaves room to draw
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(ReportError::Config(format!(
                "Page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }

        if self.margin < 0.0 {
            return Err(ReportError::Config(format!(
                "Margin cannot be negative, got {}",
                self.margin
            )));
        }

        if self.footer_reserve < self.margin {
            return Err(ReportError::Config(format!(
                "Footer reserve ({}) must be at least the margin ({})",
                self.footer_reserve, self.margin
            )));
        }

        if self.page_width - 2.0 * self.margin <= 0.0 {
            return Err(ReportError::Config(
                "Margins leave no drawable area on the page".into(),
            ));
        }

        let content_height = self.page_height - self.margin - self.footer_reserve;
        if content_height < MIN_CONTENT_HEIGHT {
            return Err(ReportError::Config(format!(
                "Page leaves {:.1} of height between margin and footer, at least {:.1} is needed",
                content_height, MIN_CONTENT_HEIGHT
            )));
        }

        Ok(())
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub number_format: NumberFormat,

    /// Date format for transaction dates in reports (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Directory for generated documents (defaults to the reports directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            layout: LayoutSettings::default(),
            number_format: NumberFormat::default(),
            date_format: default_date_format(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Check the page layout and the date format
    pub fn validate(&self) -> Result<(), ReportError> {
        self.layout.validate()?;
        format_date(NaiveDate::MIN, &self.date_format)?;
        Ok(())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ReportError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ReportError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            ReportError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Directory generated documents go to
    pub fn output_dir(&self, paths: &ReportPaths) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| paths.reports_dir())
    }
}
