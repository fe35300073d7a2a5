//! Structured logging.
//!
//! A small sink-based facility: entries carry a level, message, and
//! bounded key/value fields; a [`Logger`] filters by level and hands
//! entries to a [`LogSink`]. A swappable process-global logger mirrors
//! the usual service setup where components log without threading a
//! handle around.

mod entry;
mod level;
mod logger;

pub use entry::LogEntry;
pub use level::LogLevel;
pub use logger::{
    global, init_global, log_error, reset_global, set_global, LogConfig, LogFormat, LogSink,
    Logger, MemorySink, NoopSink, StderrSink,
};
