//! # PBDNS Exporter
//!
//! Ingests PowerDNS protobuf telemetry over TCP, keeps per-policy counters
//! and serves them for Prometheus scrapes.

mod bootstrap;
mod server;

use clap::Parser;
use pbdns_exporter_api::{create_routes, AppState};
use pbdns_exporter_application::ProcessEventUseCase;
use pbdns_exporter_domain::CliOverrides;
use pbdns_exporter_infrastructure::metrics::ExporterMetrics;
use pbdns_exporter_infrastructure::telemetry::{EventConsumer, EventHandoff, FrameSettings};
use pbdns_exporter_infrastructure::transaction_log::WriterTransactionLog;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pbdns-exporter")]
#[command(version)]
#[command(about = "PowerDNS PBDNSMessage stats exporter")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Address to listen on for protobuf connections
    #[arg(long = "pb-listen-address")]
    pb_listen_address: Option<String>,

    /// Address to listen on for the web interface and telemetry
    #[arg(long = "web-listen-address")]
    web_listen_address: Option<String>,

    /// Path under which to expose metrics
    #[arg(long = "telemetry-path")]
    telemetry_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        ingest_address: cli.pb_listen_address,
        web_address: cli.web_listen_address,
        metrics_path: cli.telemetry_path,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("PBDNS exporter starting");

    let ingest_addr = config.ingest_socket_addr()?;
    let web_addr = config.web_socket_addr()?;

    let metrics = Arc::new(ExporterMetrics::from_config(&config.metrics)?);
    let transaction_log = Arc::new(WriterTransactionLog::stdout());
    let use_case = Arc::new(ProcessEventUseCase::new(
        metrics.clone(),
        transaction_log,
    ));

    let (handoff, rx) = EventHandoff::bounded(
        config.handoff.capacity,
        Duration::from_millis(config.handoff.enqueue_timeout_ms),
        metrics.clone(),
    );
    let consumer = EventConsumer::new(use_case).start(rx);

    let shutdown = CancellationToken::new();
    let app = create_routes(AppState::new(metrics, &config.server.metrics_path));

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Cannot listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    let served = tokio::try_join!(
        server::start_ingest_server(
            ingest_addr,
            handoff,
            FrameSettings::from(&config.handoff),
            shutdown.clone(),
        ),
        server::start_web_server(web_addr, app, shutdown.clone()),
    );

    if let Err(e) = served {
        error!(error = %e, "Server failed");
        shutdown.cancel();
        return Err(e);
    }

    // Every handoff clone is gone once the ingest server returns.
    if let Err(e) = consumer.await {
        error!(error = %e, "Event consumer task failed");
    }

    info!("PBDNS exporter stopped");
    Ok(())
}
