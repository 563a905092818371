//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Wire up middleware (tracing, trace ID, timeout)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{Method, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, ServiceConfig};
use crate::http::request::{RequestLogger, TraceIdLayer};
use crate::logging::{Fields, LogCall, SharedLogger, TracingLogger};
use crate::trace::TraceId;

/// Body returned by the echo endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    #[serde(rename = "traceId")]
    pub trace_id: String,
    pub origin: String,
}

/// HTTP server with the trace middleware installed.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server that logs through the global `tracing` subscriber.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        Self::with_logger(config, Arc::new(TracingLogger::new()))
    }

    /// Create a server whose request loggers wrap `base`.
    pub fn with_logger(config: ServiceConfig, base: SharedLogger) -> Result<Self, ConfigError> {
        let validated = validate_config(&config).map_err(ConfigError::Validation)?;

        let trace_layer = TraceIdLayer::new(base)
            .with_header_name(validated.header_name)
            .with_child_policy(config.tracing.child_loggers);

        let router = Self::build_router(&config, trace_layer);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, trace_layer: TraceIdLayer) -> Router {
        Router::new()
            .route("/", get(echo))
            .route("/echo", post(echo))
            .route("/health", get(health))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(trace_layer)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            header = %self.config.tracing.header_name,
            child_loggers = ?self.config.tracing.child_loggers,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Log through the request logger and report the trace identifier.
async fn echo(logger: RequestLogger, trace_id: TraceId, method: Method, uri: Uri) -> Json<EchoResponse> {
    let mut context = Fields::new();
    context.insert("method".into(), json!(method.as_str()));
    context.insert("path".into(), json!(uri.path()));
    logger.info(LogCall::with_context(context, "echo"));

    Json(EchoResponse {
        trace_id: trace_id.to_string(),
        origin: trace_id.origin().as_str().to_string(),
    })
}

async fn health() -> &'static str {
    "ok"
}
