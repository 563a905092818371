//! Request tracing middleware.
//!
//! Assigns or propagates a trace identifier for every inbound request and
//! tags every log call made through the request's logger with it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod logging;
pub mod observability;
pub mod trace;

pub use config::ServiceConfig;
pub use http::{HttpServer, RequestLogger, TraceIdLayer};
pub use lifecycle::Shutdown;
pub use logging::{Fields, Level, LogCall, Logger, SharedLogger};
pub use trace::TraceId;
