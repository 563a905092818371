//! Trace identifier subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → id.rs (look up configured header, case-insensitive)
//!     → header present and non-empty: reuse value verbatim
//!     → otherwise: generate random v4 UUID
//!     → TraceId (immutable, per request)
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; a missing header is the common case
//! - No format validation of inbound values
//! - Generation is stateless and reentrant (OS-seeded RNG via `uuid`)

pub mod id;

pub use id::{parse_header_name, resolve, TraceId, TraceOrigin, DEFAULT_HEADER_NAME, TRACE_ID_FIELD};
