mod output;
mod refresh;
mod watch;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use correios_core::shipments::DEFAULT_DESCRIPTION;
use correios_core::{AppConfig, ConfigError, ShipmentSensor, TrackingOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "correios-cli")]
#[command(about = "Track Correios shipments from the public tracking page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and show the latest event for one tracking code
    Track {
        /// Carrier-assigned tracking code, e.g. QB123456789BR
        code: String,

        /// Label shown next to the code
        #[arg(long, default_value = DEFAULT_DESCRIPTION)]
        description: String,

        /// Print the entity as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract the latest event from a saved tracking page
    Extract {
        /// HTML file saved from the tracking page
        file: PathBuf,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Refresh every configured shipment on a fixed interval
    Watch {
        /// Shipments file (defaults to CORREIOS_SHIPMENTS_PATH)
        #[arg(long)]
        shipments: Option<PathBuf>,

        /// Refresh once and exit
        #[arg(long)]
        once: bool,
    },
}

/// Log filter used by commands that run without loading configuration.
const OFFLINE_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli, correios_core::load_app_config).await
}

/// Dispatches `cli`. Configuration is only loaded by commands that need it.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match cli.command {
        Commands::Track {
            code,
            description,
            json,
        } => {
            let config = configure(load_config)?;
            let client = refresh::build_tracking_client(&config)?;
            let icons = refresh::load_icons(&config)?;
            let mut sensor = ShipmentSensor::new(code.trim(), description);
            refresh::refresh_shipment(&client, &mut sensor, &icons).await;
            output::print_sensor(&sensor, json)?;
        }
        Commands::Extract { file, json } => {
            init_tracing(OFFLINE_LOG_LEVEL)?;
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let record = correios_scraper::extract(&html).map_err(|e| {
                anyhow::anyhow!("extraction failed at stage '{}': {e}", e.stage())
            })?;
            output::print_outcome(&TrackingOutcome::Tracked(record), json)?;
        }
        Commands::Watch { shipments, once } => {
            let config = configure(load_config)?;
            let path = shipments.unwrap_or_else(|| config.shipments_path.clone());
            watch::run_watch(&config, &path, once).await?;
        }
    }

    Ok(())
}

fn configure<F>(load_config: F) -> anyhow::Result<AppConfig>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    let config = load_config().context("invalid CORREIOS_* configuration")?;
    init_tracing(&config.log_level)?;
    Ok(config)
}

/// `RUST_LOG` wins over `level` when set.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    // Already installed when `run` is called more than once in a process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
    Ok(())
}
