//! Trace-tagging logger wrapper.
//!
//! Every call made through the wrapper gets a `traceId` field injected into
//! its context before it reaches the underlying logger. Message-only calls
//! are given a fresh context. Positional arguments pass through untouched.
//!
//! # Child loggers
//!
//! With [`ChildPolicy::Detached`] (the default), `child` returns the
//! underlying logger's child as-is: records written through it do **not**
//! carry `traceId`. Callers that need tagging on a child must re-wrap it.
//! [`ChildPolicy::Inherit`] wraps children with the same identifier instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::call::{Fields, Level, LogCall};
use crate::logging::logger::{Logger, SharedLogger};
use crate::trace::{TraceId, TRACE_ID_FIELD};

/// How `child` behaves on a wrapped logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildPolicy {
    /// Children come from the underlying logger and are not tagged.
    #[default]
    Detached,
    /// Children are wrapped with the same trace identifier.
    Inherit,
}

/// Logger that injects a trace identifier into every record.
pub struct TraceTagged {
    inner: SharedLogger,
    trace_id: TraceId,
    child_policy: ChildPolicy,
}

impl TraceTagged {
    pub fn new(inner: SharedLogger, trace_id: TraceId, child_policy: ChildPolicy) -> Self {
        Self {
            inner,
            trace_id,
            child_policy,
        }
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }
}

impl Logger for TraceTagged {
    fn log(&self, level: Level, call: LogCall) {
        let (mut context, message, args) = call.into_parts();
        context.insert(
            TRACE_ID_FIELD.to_string(),
            Value::String(self.trace_id.to_string()),
        );
        self.inner.log(
            level,
            LogCall::WithContext {
                context,
                message,
                args,
            },
        );
    }

    fn child(&self, bindings: Fields) -> SharedLogger {
        let child = self.inner.child(bindings);
        match self.child_policy {
            ChildPolicy::Detached => child,
            ChildPolicy::Inherit => wrap_with(child, self.trace_id.clone(), ChildPolicy::Inherit),
        }
    }
}

/// Wrap `logger` so every call is tagged with `trace_id`. Children are detached.
pub fn wrap(logger: SharedLogger, trace_id: TraceId) -> SharedLogger {
    wrap_with(logger, trace_id, ChildPolicy::Detached)
}

pub fn wrap_with(logger: SharedLogger, trace_id: TraceId, child_policy: ChildPolicy) -> SharedLogger {
    Arc::new(TraceTagged::new(logger, trace_id, child_policy))
}
