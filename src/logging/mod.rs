//! Request-scoped logging.
//!
//! # Data Flow
//! ```text
//! Handler code
//!     → RequestLogger (Arc<dyn Logger>, installed per request)
//!     → interceptor.rs (inject traceId into context)
//!     → base logger: sink.rs (tracing events) or memory.rs (recorded)
//! ```
//!
//! # Design Decisions
//! - Call shape is a tagged union (`LogCall`) with no ambiguous third case
//! - One wrapper type covers all six levels
//! - Child loggers are detached from trace tagging unless configured otherwise

pub mod call;
pub mod interceptor;
pub mod logger;
pub mod memory;
pub mod sink;

pub use call::{Fields, Level, LogCall};
pub use interceptor::{wrap, wrap_with, ChildPolicy, TraceTagged};
pub use logger::{Logger, SharedLogger};
pub use memory::{MemoryLogger, Record};
pub use sink::TracingLogger;
