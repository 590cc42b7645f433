//! CLI commands for setup and configuration

use crate::config::{ReportPaths, Settings};
use crate::error::ReportResult;

/// Create the data directories and write the current settings
pub fn handle_init(paths: &ReportPaths, settings: &Settings) -> ReportResult<()> {
    println!("Initializing finance-report at: {}", paths.base_dir().display());
    paths.ensure_directories()?;
    settings.save(paths)?;
    println!("Initialization complete!");
    println!();
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Reports directory: {}", settings.output_dir(paths).display());
    Ok(())
}

/// Show paths and the effective settings
pub fn handle_config(paths: &ReportPaths, settings: &Settings) -> ReportResult<()> {
    println!("finance-report Configuration");
    println!("============================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Reports directory: {}", settings.output_dir(paths).display());
    println!(
        "Initialized:       {}",
        if paths.is_initialized() { "yes" } else { "no" }
    );
    println!();
    println!("Settings:");
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
