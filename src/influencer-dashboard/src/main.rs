//! Influencer Campaign Dashboard — ROAS reporting over influencer, post,
//! tracking, and payout datasets.
//!
//! Main entry point that loads configuration and starts the server.

use clap::Parser;
use influencer_api::ApiServer;
use influencer_core::config::AppConfig;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "influencer-dashboard")]
#[command(about = "Influencer campaign performance dashboard")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c', env = "INFLUENCER_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the campaign CSV files (overrides config)
    #[arg(long, env = "INFLUENCER_DASHBOARD__DATA__DIR")]
    data_dir: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long, env = "INFLUENCER_DASHBOARD__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "INFLUENCER_DASHBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "INFLUENCER_DASHBOARD__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Skip the Prometheus exporter
    #[arg(long, default_value_t = false)]
    no_metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "influencer_dashboard=info,influencer_api=info,influencer_core=info,tower_http=info"
                    .into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Influencer dashboard starting up");

    // An explicit config file must load; otherwise fall back to defaults.
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(Some(path.as_path()))?,
        None => AppConfig::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }),
    };

    // Apply CLI overrides
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }
    if cli.no_metrics {
        config.metrics.enabled = false;
    }

    info!(
        data_dir = %config.data.dir.display(),
        host = %config.api.host,
        http_port = config.api.http_port,
        metrics = config.metrics.enabled,
        "Configuration loaded"
    );

    if !config.data.dir.is_dir() {
        warn!(
            data_dir = %config.data.dir.display(),
            "Data directory not found; pages will report load errors until it exists"
        );
    }

    let api_server = ApiServer::new(config);

    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Influencer dashboard is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
