//! Handler extractors for the values installed by [`TraceIdLayer`].
//!
//! Both reject with `500` when the layer is missing from the stack: that is a
//! wiring bug in the service, not something the client did.
//!
//! [`TraceIdLayer`]: crate::http::TraceIdLayer

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use crate::http::request::RequestLogger;
use crate::trace::TraceId;

const MISSING_LAYER: &str = "Trace middleware is not installed";

impl<S> FromRequestParts<S> for RequestLogger
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestLogger>().cloned().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "RequestLogger requested without TraceIdLayer");
            (StatusCode::INTERNAL_SERVER_ERROR, MISSING_LAYER)
        })
    }
}

impl<S> FromRequestParts<S> for TraceId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<TraceId>().cloned().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "TraceId requested without TraceIdLayer");
            (StatusCode::INTERNAL_SERVER_ERROR, MISSING_LAYER)
        })
    }
}
