use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use finance_report::cli::{
    handle_config, handle_generate, handle_init, handle_summary, GenerateArgs, PeriodArgs,
};
use finance_report::config::{ReportPaths, Settings};

#[derive(Parser)]
#[command(
    name = "finreport",
    version,
    about = "Multi-page financial reports from transaction files",
    long_about = "finreport turns a list of income and expense transactions into a \
                  paginated financial report: summary cards, insights, a transaction \
                  table and a per-category breakdown."
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report document for a period
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Print period statistics and category breakdowns
    Summary(PeriodArgs),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !verbose => {
            builder.parse_filters(&filters);
        }
        _ => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            };
            builder.filter_level(level);
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Generate(args)) => handle_generate(&paths, &settings, args)?,
        Some(Commands::Summary(args)) => handle_summary(&settings, args)?,
        Some(Commands::Init) => handle_init(&paths, &settings)?,
        Some(Commands::Config) => handle_config(&paths, &settings)?,
        None => {
            println!("finreport - financial report generator");
            println!();
            println!("Run 'finreport --help' for usage information.");
        }
    }

    Ok(())
}
