//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (subscriber for tracing events and spans)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (text or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Trace ID flows through every request span and request-logger record
//! - Metrics are cheap (atomic increments) and off by default

pub mod logging;
pub mod metrics;
