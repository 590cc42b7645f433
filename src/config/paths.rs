//! Path management
//!
//! Provides XDG-compliant path resolution for settings and generated reports.
//!
//! ## Path Resolution Order
//!
//! 1. `FINREPORT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finance-report` or `~/.config/finance-report`
//! 3. Windows: `%APPDATA%\finance-report`

use std::path::PathBuf;

use crate::error::ReportError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FINREPORT_DATA_DIR";

/// Manages all paths used by the report tool
#[derive(Debug, Clone)]
pub struct ReportPaths {
    base_dir: PathBuf,
}

impl ReportPaths {
    /// Create a new ReportPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ReportError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default directory for generated documents
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Ensure the base and reports directories exist
    pub fn ensure_directories(&self) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ReportError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.reports_dir())
            .map_err(|e| ReportError::Io(format!("Failed to create reports directory: {}", e)))?;

        Ok(())
    }

    /// Check if settings have been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ReportError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| ReportError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("finance-report"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ReportError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ReportError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finance-report"))
}
