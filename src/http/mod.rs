//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (resolve trace ID, install tagged logger)
//!     → extract.rs (hand RequestLogger / TraceId to handlers)
//!     → handler logs through the request logger
//! ```

pub mod extract;
pub mod request;
pub mod server;

pub use request::{RequestLogger, TraceIdLayer, TraceIdService};
pub use server::HttpServer;
