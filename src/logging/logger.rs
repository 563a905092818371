//! The logging capability set.

use std::sync::Arc;

use crate::logging::call::{Fields, Level, LogCall};

/// Shared handle to a logger, as stored in a request's logging slot.
pub type SharedLogger = Arc<dyn Logger>;

/// Six severity entry points plus a child constructor.
///
/// Implementors provide [`Logger::log`] and [`Logger::child`]; the
/// per-level methods all funnel into `log`.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, call: LogCall);

    /// Derive a logger that attaches `bindings` to every record.
    fn child(&self, bindings: Fields) -> SharedLogger;

    fn trace(&self, call: LogCall) {
        self.log(Level::Trace, call)
    }

    fn debug(&self, call: LogCall) {
        self.log(Level::Debug, call)
    }

    fn info(&self, call: LogCall) {
        self.log(Level::Info, call)
    }

    fn warn(&self, call: LogCall) {
        self.log(Level::Warn, call)
    }

    fn error(&self, call: LogCall) {
        self.log(Level::Error, call)
    }

    fn fatal(&self, call: LogCall) {
        self.log(Level::Fatal, call)
    }
}

/// Merge child bindings under a call's context. Keys present in the call win.
pub(crate) fn merge_bindings(bindings: &Fields, context: Fields) -> Fields {
    if bindings.is_empty() {
        return context;
    }
    let mut merged = bindings.clone();
    merged.extend(context);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_prefers_call_context() {
        let mut bindings = Fields::new();
        bindings.insert("component".into(), json!("db"));
        bindings.insert("user".into(), json!("bound"));

        let mut context = Fields::new();
        context.insert("user".into(), json!("a"));

        let merged = merge_bindings(&bindings, context);
        assert_eq!(merged["component"], json!("db"));
        assert_eq!(merged["user"], json!("a"));
    }
}
