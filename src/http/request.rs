//! Per-request trace hook.
//!
//! # Responsibilities
//! - Resolve the trace identifier from the configured header
//! - Wrap the request's current logger and install it in the request
//! - Run the rest of the chain inside a `request` span carrying `trace_id`
//!
//! # Design Decisions
//! - Runs synchronously in `call`, before the inner service sees the request
//! - No I/O, no locks: everything lives in the request's extensions
//! - An upstream `RequestLogger` is wrapped in place of the base logger

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{HeaderName, Request};
use tower::{Layer, Service};
use tracing::instrument::{Instrument, Instrumented};

use crate::logging::{wrap_with, ChildPolicy, Logger, SharedLogger};
use crate::observability::metrics;
use crate::trace::{self, TraceId};

/// The request's logging slot.
///
/// Inserted into request extensions by [`TraceIdLayer`]; extract it in
/// handlers to log with the request's trace identifier attached.
#[derive(Clone)]
pub struct RequestLogger(pub SharedLogger);

impl RequestLogger {
    pub fn into_inner(self) -> SharedLogger {
        self.0
    }
}

impl std::ops::Deref for RequestLogger {
    type Target = dyn Logger;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLogger").finish_non_exhaustive()
    }
}

/// Layer that tags every request with a trace identifier.
#[derive(Clone)]
pub struct TraceIdLayer {
    header_name: HeaderName,
    base: SharedLogger,
    child_policy: ChildPolicy,
}

impl TraceIdLayer {
    /// Layer reading the default `x-trace-id` header.
    pub fn new(base: SharedLogger) -> Self {
        Self {
            header_name: HeaderName::from_static(trace::DEFAULT_HEADER_NAME),
            base,
            child_policy: ChildPolicy::default(),
        }
    }

    pub fn with_header_name(mut self, header_name: HeaderName) -> Self {
        self.header_name = header_name;
        self
    }

    pub fn with_child_policy(mut self, child_policy: ChildPolicy) -> Self {
        self.child_policy = child_policy;
        self
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }
}

impl<S> Layer<S> for TraceIdLayer {
    type Service = TraceIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceIdService {
            inner,
            header_name: self.header_name.clone(),
            base: self.base.clone(),
            child_policy: self.child_policy,
        }
    }
}

/// Service produced by [`TraceIdLayer`].
#[derive(Clone)]
pub struct TraceIdService<S> {
    inner: S,
    header_name: HeaderName,
    base: SharedLogger,
    child_policy: ChildPolicy,
}

impl<S, B> Service<Request<B>> for TraceIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Instrumented<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let trace_id = trace::resolve(req.headers(), &self.header_name);
        metrics::record_trace_id(trace_id.origin());

        let current = req
            .extensions()
            .get::<RequestLogger>()
            .map(|logger| logger.0.clone())
            .unwrap_or_else(|| Arc::clone(&self.base));
        let logger = wrap_with(current, trace_id.clone(), self.child_policy);

        let span = tracing::info_span!(
            "request",
            trace_id = %trace_id,
            origin = trace_id.origin().as_str()
        );

        req.extensions_mut().insert(RequestLogger(logger));
        req.extensions_mut().insert::<TraceId>(trace_id);

        self.inner.call(req).instrument(span)
    }
}

impl Default for TraceIdLayer {
    fn default() -> Self {
        Self::new(Arc::new(crate::logging::TracingLogger::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    use axum::body::Body;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use tower::service_fn;

    use crate::logging::MemoryLogger;

    fn origin_count(snapshot: &[(metrics_util::CompositeKey, DebugValue)], origin: &str) -> Option<u64> {
        snapshot.iter().find_map(|(key, value)| {
            let key = key.key();
            let matches = key.name() == "trace_ids_total"
                && key
                    .labels()
                    .any(|label| label.key() == "origin" && label.value() == origin);
            match value {
                DebugValue::Counter(count) if matches => Some(*count),
                _ => None,
            }
        })
    }

    #[test]
    fn test_default_header_matches_parsed_default() {
        let layer = TraceIdLayer::new(Arc::new(MemoryLogger::new()));
        assert_eq!(
            layer.header_name(),
            &trace::parse_header_name(trace::DEFAULT_HEADER_NAME).unwrap()
        );
    }

    #[test]
    fn test_counts_trace_ids_by_origin() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        ::metrics::with_local_recorder(&recorder, || {
            let mut svc = TraceIdLayer::new(Arc::new(MemoryLogger::new()))
                .layer(service_fn(|_req: Request<Body>| async { Ok::<_, Infallible>(()) }));

            let propagated = Request::builder()
                .header("x-trace-id", "abc123")
                .body(Body::empty())
                .unwrap();
            drop(svc.call(propagated));
            drop(svc.call(Request::new(Body::empty())));
        });

        let snapshot: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key, value))
            .collect();
        assert_eq!(origin_count(&snapshot, "propagated"), Some(1));
        assert_eq!(origin_count(&snapshot, "generated"), Some(1));
    }
}
