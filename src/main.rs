//! Request Tracer (v1)
//!
//! Demo service for the trace middleware.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request (X-Trace-Id?)
//!     ─────────────────────────────▶ TraceLayer (tower-http span)
//!                                        │
//!                                        ▼
//!                                    TraceIdLayer ── resolve header or generate UUID
//!                                        │           wrap request logger
//!                                        ▼
//!                                    handler ── logger.info(...) ──▶ { traceId, ... }
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_tracer::config::{load_config, ObservabilityConfig, ServiceConfig};
use request_tracer::observability::{logging, metrics};
use request_tracer::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "request-tracer")]
#[command(about = "HTTP service that tags request logs with a trace ID", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => load_config(path),
        None => Ok(ServiceConfig::default()),
    };

    let observability = loaded
        .as_ref()
        .map(|config| config.observability.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default());
    logging::init_logging(&observability)?;

    let mut config = loaded.map_err(|e| {
        tracing::error!(error = %e, "Configuration error");
        e
    })?;

    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!("request-tracer v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        header_name = %config.tracing.header_name,
        child_loggers = ?config.tracing.child_loggers,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let server = HttpServer::new(config.clone()).map_err(|e| {
        tracing::error!(error = %e, "Configuration error");
        e
    })?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let mut server_task = tokio::spawn(server.run(listener, server_shutdown));

    tokio::select! {
        result = &mut server_task => result??,
        _ = shutdown.trigger_on_signal() => server_task.await??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
