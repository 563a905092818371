//! In-memory logger that records every call.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::logging::call::{Fields, Level, LogCall};
use crate::logging::logger::{merge_bindings, Logger, SharedLogger};

/// A record captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: Level,
    /// Context as received, with any child bindings merged underneath.
    pub context: Fields,
    pub message: String,
    pub args: Vec<Value>,
}

impl Record {
    pub fn trace_id(&self) -> Option<&str> {
        self.context
            .get(crate::trace::TRACE_ID_FIELD)
            .and_then(Value::as_str)
    }
}

/// Logger that keeps records in a shared buffer.
///
/// Children write into the same buffer as their parent.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    records: Arc<Mutex<Vec<Record>>>,
    bindings: Fields,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, in call order.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .expect("memory logger mutex poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("memory logger mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .expect("memory logger mutex poisoned")
            .clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, call: LogCall) {
        let (context, message, args) = call.into_parts();
        let record = Record {
            level,
            context: merge_bindings(&self.bindings, context),
            message,
            args,
        };
        self.records
            .lock()
            .expect("memory logger mutex poisoned")
            .push(record);
    }

    fn child(&self, bindings: Fields) -> SharedLogger {
        let mut merged = self.bindings.clone();
        merged.extend(bindings);
        Arc::new(MemoryLogger {
            records: self.records.clone(),
            bindings: merged,
        })
    }
}
