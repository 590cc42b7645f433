//! CLI commands for reports
//!
//! `generate` lays out a report and writes the document next to the other
//! generated reports; `summary` prints the same figures as terminal tables.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{ReportPaths, Settings};
use crate::display::{format_breakdown_table, format_stats_table};
use crate::error::{ReportError, ReportResult};
use crate::models::{PeriodType, ReportPeriod, Transaction};
use crate::render::{GeneratedReport, RecordingSurface, ReportAssembler, SurfaceError};
use crate::reports::ReportRequest;
use crate::storage::load_transactions;

/// Input file and period selection shared by the report commands
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Transactions file (.json or .csv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Period type: month, quarter, year or custom
    #[arg(short, long, default_value = "month")]
    pub period: PeriodType,

    /// Month (1-12); defaults to the current month
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Year; defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,
}

impl PeriodArgs {
    /// The selected period, filling missing parts from today's date
    pub fn resolve(&self) -> ReportResult<ReportPeriod> {
        let current = ReportPeriod::current(self.period);
        ReportPeriod::new(
            self.period,
            self.month.unwrap_or(current.month),
            self.year.unwrap_or(current.year),
        )
        .map_err(|e| ReportError::Validation(e.to_string()))
    }

    fn load(&self) -> ReportResult<(ReportPeriod, Vec<Transaction>)> {
        let period = self.resolve()?;
        let transactions = load_transactions(&self.input)?;
        Ok((period, transactions))
    }
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Output directory (defaults to the configured reports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the result as JSON instead of a summary
    #[arg(long)]
    pub json_only: bool,
}

/// Generate a report document and write it to disk
pub fn handle_generate(
    paths: &ReportPaths,
    settings: &Settings,
    args: GenerateArgs,
) -> ReportResult<()> {
    let (period, transactions) = args.period.load()?;
    let request = ReportRequest::for_period(&period, &transactions)?;
    let output_dir = args.output.unwrap_or_else(|| settings.output_dir(paths));

    let (report, path) = generate_to_dir(settings, &request, &output_dir)?;

    if args.json_only {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Report generated: {}", path.display());
        println!("  Period:       {}", request.period_label);
        println!("  Pages:        {}", report.page_count);
        println!("  Transactions: {}", request.transactions.len());
    }

    Ok(())
}

/// Render `request` on an in-memory surface and write the document as JSON
pub fn generate_to_dir(
    settings: &Settings,
    request: &ReportRequest,
    output_dir: &Path,
) -> ReportResult<(GeneratedReport, PathBuf)> {
    let mut surface = RecordingSurface::new(settings.layout.page_width, settings.layout.page_height);
    let report = ReportAssembler::new(settings.clone()).generate(request, &mut surface)?;

    let document = surface
        .into_document()
        .ok_or_else(|| SurfaceError::Save("document was not finalized".into()))?;
    let path = document.write_json(output_dir)?;
    Ok((report, path))
}

/// Print period statistics and category breakdowns
pub fn handle_summary(settings: &Settings, args: PeriodArgs) -> ReportResult<()> {
    let (period, transactions) = args.load()?;
    let request = ReportRequest::for_period(&period, &transactions)?;
    request.validate()?;

    let number_format = &settings.number_format;
    println!("{}", request.period_label);
    println!();
    println!(
        "{}",
        format_stats_table(&request.current_stats, &request.previous_stats, number_format)
    );
    println!();
    println!(
        "{}",
        format_breakdown_table(&request.expense_breakdown()?, number_format)
    );
    println!();
    println!(
        "{}",
        format_breakdown_table(&request.income_breakdown()?, number_format)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use crate::render::Document;
    use crate::storage::read_json;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_period() {
        let args = PeriodArgs {
            input: PathBuf::from("t.csv"),
            period: PeriodType::Quarter,
            month: Some(5),
            year: Some(2025),
        };
        let period = args.resolve().unwrap();
        assert_eq!(period.quarter(), 2);
        assert_eq!(period.label(), "2º Trimestre 2025");
    }

    #[test]
    fn test_resolve_defaults_to_current_period() {
        let args = PeriodArgs {
            input: PathBuf::from("t.csv"),
            period: PeriodType::Year,
            month: None,
            year: Some(2024),
        };
        let period = args.resolve().unwrap();
        assert_eq!(period.year, 2024);
        assert_eq!(period.month, ReportPeriod::current(PeriodType::Year).month);
    }

    #[test]
    fn test_resolve_rejects_bad_month() {
        let args = PeriodArgs {
            input: PathBuf::from("t.csv"),
            period: PeriodType::Month,
            month: Some(13),
            year: Some(2025),
        };
        assert!(matches!(args.resolve(), Err(ReportError::Validation(_))));
    }

    #[test]
    fn test_generate_to_dir_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let period = ReportPeriod::new(PeriodType::Month, 3, 2025).unwrap();
        let transactions = vec![Transaction::new(
            TransactionType::Expense,
            Money::from_cents(12_000),
            "Moradia",
            "Aluguel",
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        )];
        let request = ReportRequest::for_period(&period, &transactions).unwrap();

        let (report, path) =
            generate_to_dir(&Settings::default(), &request, temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join(format!("{}.json", report.file_name)));

        let document: Document = read_json(&path).unwrap();
        assert_eq!(document.page_count(), report.page_count as usize);
        assert!(document.pages[1].contains_text("Aluguel"));
    }
}
