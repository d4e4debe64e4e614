//! Burrow consumer-lag Prometheus exporter.
//!
//! A long-lived process that periodically walks Burrow's cluster → consumer
//! group hierarchy and republishes each group's lag as labeled Prometheus
//! gauges.
//!
//! ```text
//! ┌────────────┐   tick    ┌─────────────────────────────────────┐
//! │  scheduler │──────────▶│ list clusters                        │
//! └────────────┘           │   ├─ per cluster: list groups        │
//!       ▲                  │   │    └─ per group: fetch lag ──────┼──▶ gauges
//!       │ barrier          │   └─ join all                        │
//!       └──────────────────┴─────────────────────────────────────┘
//!                                                  │
//!                              /metrics endpoint ◀─┘ (pull scrape)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use burrow_exporter::burrow::BurrowClient;
use burrow_exporter::config::loader::{self, ConfigError};
use burrow_exporter::config::validation::validate_config;
use burrow_exporter::config::ExporterConfig;
use burrow_exporter::lifecycle::{signals, Shutdown};
use burrow_exporter::observability::metrics::PrometheusSink;
use burrow_exporter::observability::{logging, metrics};
use burrow_exporter::scrape::Scraper;

#[derive(Parser)]
#[command(name = "burrow-exporter")]
#[command(about = "Exports Kafka consumer lag from Burrow as Prometheus metrics", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Burrow base URL (overrides the config file).
    #[arg(long)]
    burrow_url: Option<String>,

    /// Scrape interval in seconds (overrides the config file).
    #[arg(long)]
    interval: Option<u64>,

    /// Metrics listen address (overrides the config file).
    #[arg(long)]
    metrics_address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => ExporterConfig::default(),
    };
    if let Some(url) = cli.burrow_url {
        config.burrow.base_url = url;
    }
    if let Some(interval) = cli.interval {
        config.scrape.interval_secs = interval;
    }
    if let Some(addr) = cli.metrics_address {
        config.observability.metrics_address = addr;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        burrow_url = %config.burrow.base_url,
        interval_secs = config.scrape.interval_secs,
        metrics_address = %config.observability.metrics_address,
        "configuration loaded"
    );

    let handle = metrics::install_recorder()?;
    let listener = TcpListener::bind(&config.observability.metrics_address).await?;
    tracing::info!(address = %listener.local_addr()?, "metrics endpoint listening");

    let shutdown = Shutdown::new();

    let exposition = tokio::spawn(metrics::serve(listener, handle, shutdown.subscribe()));

    let client = Arc::new(BurrowClient::new(&config.burrow)?);
    let sink = Arc::new(PrometheusSink::new());
    let scraper = Scraper::new(client, sink, config.scrape.clone());
    let scraper_task = tokio::spawn(scraper.run(shutdown.subscribe()));

    signals::wait_for_termination(&shutdown).await;

    // Awaiting the scraper gives the drain guarantee: a cycle in flight at
    // signal time completes before the process exits.
    let _ = scraper_task.await;
    let _ = exposition.await;

    tracing::info!("shutdown complete");
    Ok(())
}
