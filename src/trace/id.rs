//! Trace identifier type and resolution from inbound headers.

use std::fmt;
use std::sync::Arc;

use axum::http::header::InvalidHeaderName;
use axum::http::{HeaderMap, HeaderName};
use uuid::Uuid;

/// Header consulted when no override is configured. Lower case, since
/// header lookup ignores case and `HeaderName` is stored lower case.
pub const DEFAULT_HEADER_NAME: &str = "x-trace-id";

/// Context field the interceptor writes the identifier into.
pub const TRACE_ID_FIELD: &str = "traceId";

/// Where a trace identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOrigin {
    /// Copied from the inbound header.
    Propagated,
    /// Freshly generated for this request.
    Generated,
}

impl TraceOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceOrigin::Propagated => "propagated",
            TraceOrigin::Generated => "generated",
        }
    }
}

/// Opaque per-request trace identifier.
///
/// Clones share the same backing string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId {
    value: Arc<str>,
    origin: TraceOrigin,
}

impl TraceId {
    /// Generate a new random identifier in hyphenated v4 UUID layout.
    pub fn generate() -> Self {
        Self {
            value: Arc::from(Uuid::new_v4().to_string()),
            origin: TraceOrigin::Generated,
        }
    }

    /// Wrap an identifier received from a client. The value is taken as-is.
    pub fn propagated(value: impl Into<Arc<str>>) -> Self {
        Self {
            value: value.into(),
            origin: TraceOrigin::Propagated,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> TraceOrigin {
        self.origin
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for TraceId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Parse a configured header name. Matching is case-insensitive, so the
/// name is normalised to lower case.
pub fn parse_header_name(name: &str) -> Result<HeaderName, InvalidHeaderName> {
    HeaderName::from_bytes(name.trim().to_ascii_lowercase().as_bytes())
}

/// Resolve the trace identifier for a request.
///
/// Every occurrence of `header_name` is decoded (lossily, for bytes that are
/// not UTF-8) and joined with `", "`, the same way a repeated header folds
/// into a single field. The joined value is reused unless it is empty, in
/// which case a new identifier is generated. Values are not validated.
pub fn resolve(headers: &HeaderMap, header_name: &HeaderName) -> TraceId {
    let joined = headers
        .get_all(header_name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        TraceId::generate()
    } else {
        TraceId::propagated(joined)
    }
}
