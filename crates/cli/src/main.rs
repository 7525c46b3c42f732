//! HRSuite CLI - Main Entry Point
//!
//! Inspects the suite's test data workbook and exports the parameterized
//! run plan consumed by the browser runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{data, plan};
use hrsuite_testdata::{DataError, SuiteConfig};

/// HRSuite - data-driven OrangeHRM E2E suite
#[derive(Parser)]
#[command(name = "hrsuite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Suite configuration file
    #[arg(long, default_value = "hrsuite.toml", global = true)]
    config: PathBuf,

    /// Test data workbook (overrides [data] workbook)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Default login username for flows that log in first
    #[arg(long, env = "PLAYWRIGHT_USERNAME", global = true)]
    username: Option<String>,

    /// Default login password for flows that log in first
    #[arg(long, env = "PLAYWRIGHT_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of the workbook
    Sheets,

    /// Log every record with its sheet row
    Dump,

    /// Summarize test cases and their row counts
    Cases,

    /// Show the records of one test case
    Show(data::ShowArgs),

    /// Expand declared test cases into parameterized runs
    Plan(plan::PlanArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        output::print_error(&format!("{:#}", e));
        if is_fatal_load(&e) {
            output::print_warning("Test data could not be loaded; the run was aborted");
        }
        std::process::exit(1);
    }
}

/// Whether the error chain holds a missing workbook or sheet
fn is_fatal_load(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<DataError>())
        .any(DataError::is_fatal_load)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SuiteConfig::load(&cli.config)?.with_credentials(cli.username, cli.password);
    if let Some(path) = cli.data {
        config.data.workbook = path;
    }

    match cli.command {
        Commands::Sheets => data::sheets(&config, cli.format)?,
        Commands::Dump => data::dump(&config)?,
        Commands::Cases => data::cases(&config, cli.format)?,
        Commands::Show(args) => data::show(args, &config, cli.format)?,
        Commands::Plan(args) => plan::execute(args, &config, cli.format)?,
    }

    Ok(())
}
