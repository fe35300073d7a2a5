//! The logger: level filtering, sink dispatch, and the process-global
//! slot components share.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::{Mutex, RwLock};

use super::entry::LogEntry;
use super::level::LogLevel;
use crate::errors;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Application name, stamped on every entry as the `app` field.
    pub app: String,
    /// Minimum level to emit.
    pub level: LogLevel,
    /// Development mode: human-readable console lines instead of JSON.
    pub dev: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app: String::new(),
            level: LogLevel::Info,
            dev: false,
        }
    }
}

/// Output format for rendered entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single console line per entry.
    Text,
    /// One JSON object per line.
    Json,
}

/// Destination for log entries.
///
/// Sinks receive entries after level filtering and stamping; they own
/// formatting and delivery.
pub trait LogSink: Send + Sync {
    /// Writes one entry.
    fn write(&self, entry: &LogEntry);
}

/// Sink that writes rendered entries to stderr.
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    format: LogFormat,
}

impl StderrSink {
    /// Creates a stderr sink with the given format.
    #[must_use]
    pub const fn new(format: LogFormat) -> Self {
        Self { format }
    }
}

impl LogSink for StderrSink {
    fn write(&self, entry: &LogEntry) {
        match self.format {
            LogFormat::Text => eprintln!("{}", entry.render_text()),
            LogFormat::Json => eprintln!("{}", entry.render_json()),
        }
    }
}

/// Sink that retains entries in memory; for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    /// Creates an empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the retained entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry) {
        self.entries.lock().push(entry.clone());
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn write(&self, _entry: &LogEntry) {}
}

/// A level-filtering logger in front of a sink.
#[derive(Clone)]
pub struct Logger {
    app: String,
    min_level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("app", &self.app)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Creates a logger that writes to `sink`.
    #[must_use]
    pub fn new(app: impl Into<String>, min_level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self {
            app: app.into(),
            min_level,
            sink,
        }
    }

    /// Creates a logger from configuration, writing to stderr.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        let format = if config.dev {
            LogFormat::Text
        } else {
            LogFormat::Json
        };
        Self::new(&config.app, config.level, Arc::new(StderrSink::new(format)))
    }

    /// Creates a logger that discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new("", LogLevel::Error, Arc::new(NoopSink))
    }

    /// Returns the minimum level this logger emits.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Emits an entry if its level passes the threshold.
    ///
    /// The app name is stamped as an `app` field and a wall-clock
    /// timestamp is applied unless the entry already carries one.
    pub fn log(&self, entry: LogEntry) {
        if !entry.level().is_enabled_at(self.min_level) {
            return;
        }
        let mut entry = entry;
        if !self.app.is_empty() && entry.field("app").is_none() {
            entry = entry.with_field("app", &self.app);
        }
        if entry.timestamp_ms() == 0 {
            entry = entry.with_timestamp_ms(now_ms());
        }
        self.sink.write(&entry);
    }

    /// Logs a DEBUG message.
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogEntry::debug(message));
    }

    /// Logs an INFO message.
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogEntry::info(message));
    }

    /// Logs a WARN message.
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogEntry::warn(message));
    }

    /// Logs an ERROR message.
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogEntry::error(message));
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Logs an error with its structured context.
///
/// If the error's unwrap chain carries a structured error, its message is
/// logged with the metadata attached as fields; otherwise `msg` is logged
/// with the rendered error as a single `error` field.
pub fn log_error(logger: &Logger, msg: &str, err: &(dyn std::error::Error + 'static)) {
    match errors::from_chain(err) {
        Some(se) => {
            let mut entry = LogEntry::error(se.message()).with_field("reason", se.reason());
            for (k, v) in se.metadata() {
                entry = entry.with_field(k, v);
            }
            logger.log(entry);
        }
        None => {
            logger.log(LogEntry::error(msg).with_field("error", err.to_string()));
        }
    }
}

static GLOBAL: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Installs `logger` as the process-global logger.
pub fn set_global(logger: Logger) {
    *GLOBAL.write() = Some(Arc::new(logger));
}

/// Builds a logger from `config` and installs it globally.
pub fn init_global(config: &LogConfig) {
    set_global(Logger::from_config(config));
}

/// Returns the process-global logger, or a no-op logger before
/// [`init_global`] has run.
#[must_use]
pub fn global() -> Arc<Logger> {
    GLOBAL
        .read()
        .clone()
        .unwrap_or_else(|| Arc::new(Logger::noop()))
}

/// Removes the installed global logger.
pub fn reset_global() {
    *GLOBAL.write() = None;
}
