//! Terminwatch CLI shell.
//!
//! Thin binary over the `crates/` libraries: parses flags, loads
//! configuration, runs one availability check, and maps the outcome to the
//! process exit status. A clear verdict line goes to stdout; any fatal
//! stage error exits non-zero with its stage-attributed message.

use clap::Parser;
use terminwatch_core::AppConfig;
use terminwatch_pipeline::{CheckOrchestrator, Verdict};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "terminwatch",
    version,
    about = "Check the booking portal for open appointment slots"
)]
struct Cli {
    /// Path to a TOML config file (defaults to the XDG config location)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the configured case type id (the portal's cts parameter)
    #[arg(long)]
    cts: Option<u32>,

    /// Override the configured case type label
    #[arg(long)]
    case_label: Option<String>,
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,terminwatch=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<Verdict> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides();

    if let Some(cts) = cli.cts {
        config.case_type.id = cts;
    }
    if let Some(label) = cli.case_label {
        config.case_type.label = label;
    }
    config.validate()?;

    info!("checking availability for {}", config.case_type);

    let orchestrator = CheckOrchestrator::from_config(&config)?;
    Ok(orchestrator.run().await?)
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let exit = match run(cli).await {
        Ok(verdict) => {
            match verdict.date() {
                Some(date) => println!("Appointments found: {date}"),
                None => println!("No appointments found"),
            }
            0
        }
        Err(e) => {
            error!("check failed: {e}");
            1
        }
    };

    std::process::exit(exit);
}
