//! Logger backed by the `tracing` subscriber.

use std::sync::Arc;

use serde_json::Value;

use crate::logging::call::{Fields, Level, LogCall};
use crate::logging::logger::{merge_bindings, Logger, SharedLogger};

/// Emits each call as a `tracing` event.
///
/// The context is recorded as a JSON `context` field and positional
/// arguments, when present, as a JSON `args` field. `tracing` has no fatal
/// level, so fatal records are emitted at `ERROR` with `fatal = true`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    bindings: Fields,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, call: LogCall) {
        let (context, message, args) = call.into_parts();
        let context = Value::Object(merge_bindings(&self.bindings, context));
        let args = (!args.is_empty()).then(|| Value::Array(args));
        let args = args.as_ref().map(tracing::field::display);

        match level {
            Level::Trace => tracing::trace!(context = %context, args, "{}", message),
            Level::Debug => tracing::debug!(context = %context, args, "{}", message),
            Level::Info => tracing::info!(context = %context, args, "{}", message),
            Level::Warn => tracing::warn!(context = %context, args, "{}", message),
            Level::Error => tracing::error!(context = %context, args, "{}", message),
            Level::Fatal => {
                tracing::error!(fatal = true, context = %context, args, "{}", message)
            }
        }
    }

    fn child(&self, bindings: Fields) -> SharedLogger {
        let mut merged = self.bindings.clone();
        merged.extend(bindings);
        Arc::new(TracingLogger { bindings: merged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_emits_context_and_message() {
        let output = capture(|| {
            let mut context = Fields::new();
            context.insert("traceId".into(), json!("abc123"));
            TracingLogger::new().info(LogCall::with_context(context, "hello").arg(1));
        });

        assert!(output.contains("INFO"));
        assert!(output.contains("hello"));
        assert!(output.contains(r#"{"traceId":"abc123"}"#));
        assert!(output.contains("args=[1]"));
    }

    #[test]
    fn test_fatal_maps_to_error() {
        let output = capture(|| TracingLogger::new().fatal("boom".into()));

        assert!(output.contains("ERROR"));
        assert!(output.contains("fatal=true"));
        assert!(output.contains("boom"));
    }

    #[test]
    fn test_child_bindings_are_emitted() {
        let output = capture(|| {
            let mut bindings = Fields::new();
            bindings.insert("component".into(), json!("db"));
            TracingLogger::new().child(bindings).warn("slow query".into());
        });

        assert!(output.contains("WARN"));
        assert!(output.contains(r#""component":"db""#));
    }
}
