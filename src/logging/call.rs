//! Call shape for a single log invocation.

use std::fmt;

use serde_json::{Map, Value};

/// Structured key-value payload attached to a log record.
pub type Fields = Map<String, Value>;

/// Severity levels supported by every [`Logger`](crate::logging::Logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logging call: `(context?, message, ...args)`.
///
/// A call either carries an explicit context object or only a message; there
/// is no third shape.
#[derive(Debug, Clone, PartialEq)]
pub enum LogCall {
    WithContext {
        context: Fields,
        message: String,
        args: Vec<Value>,
    },
    MessageOnly {
        message: String,
        args: Vec<Value>,
    },
}

impl LogCall {
    pub fn message(message: impl Into<String>) -> Self {
        LogCall::MessageOnly {
            message: message.into(),
            args: Vec::new(),
        }
    }

    pub fn with_context(context: Fields, message: impl Into<String>) -> Self {
        LogCall::WithContext {
            context,
            message: message.into(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        match &mut self {
            LogCall::WithContext { args, .. } | LogCall::MessageOnly { args, .. } => {
                args.push(value.into())
            }
        }
        self
    }

    pub fn message_str(&self) -> &str {
        match self {
            LogCall::WithContext { message, .. } | LogCall::MessageOnly { message, .. } => message,
        }
    }

    pub fn args(&self) -> &[Value] {
        match self {
            LogCall::WithContext { args, .. } | LogCall::MessageOnly { args, .. } => args,
        }
    }

    pub fn context(&self) -> Option<&Fields> {
        match self {
            LogCall::WithContext { context, .. } => Some(context),
            LogCall::MessageOnly { .. } => None,
        }
    }

    /// Split into `(context, message, args)`, creating an empty context for
    /// message-only calls.
    pub fn into_parts(self) -> (Fields, String, Vec<Value>) {
        match self {
            LogCall::WithContext {
                context,
                message,
                args,
            } => (context, message, args),
            LogCall::MessageOnly { message, args } => (Fields::new(), message, args),
        }
    }
}

impl From<&str> for LogCall {
    fn from(message: &str) -> Self {
        LogCall::message(message)
    }
}

impl From<String> for LogCall {
    fn from(message: String) -> Self {
        LogCall::message(message)
    }
}

impl From<(Fields, &str)> for LogCall {
    fn from((context, message): (Fields, &str)) -> Self {
        LogCall::with_context(context, message)
    }
}

impl From<(Fields, String)> for LogCall {
    fn from((context, message): (Fields, String)) -> Self {
        LogCall::with_context(context, message)
    }
}
