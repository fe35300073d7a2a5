//! Structured log entries.
//!
//! An entry combines a message, severity level, timestamp, and key/value
//! fields. Entries are immutable once handed to a sink; the builder
//! methods consume and return the entry.

use std::fmt;
use std::fmt::Write as _;

use super::level::LogLevel;

/// Maximum number of fields in a log entry (to bound memory).
const MAX_FIELDS: usize = 16;

/// A structured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    level: LogLevel,
    message: String,
    /// Milliseconds since the Unix epoch; 0 until a logger stamps it.
    timestamp_ms: u64,
    target: Option<String>,
    fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry with the given level and message.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp_ms: 0,
            target: None,
            fields: Vec::new(),
        }
    }

    /// Creates a TRACE level entry.
    #[must_use]
    pub fn trace(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Trace, message)
    }

    /// Creates a DEBUG level entry.
    #[must_use]
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, message)
    }

    /// Creates an INFO level entry.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Creates a WARN level entry.
    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    /// Creates an ERROR level entry.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// Adds a structured field.
    ///
    /// Fields past the per-entry bound are ignored.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if self.fields.len() < MAX_FIELDS {
            self.fields.push((key.into(), value.into()));
        }
        self
    }

    /// Sets the timestamp (milliseconds since the Unix epoch).
    #[must_use]
    pub fn with_timestamp_ms(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Sets the target/module name.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Returns the log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns the log message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the timestamp in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Returns the target, if set.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Returns the structured fields.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns the value of the named field, if present.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the entry as a single console line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut line = String::new();
        let _ = write!(line, "{} [{}]", self.timestamp_ms, self.level.as_char());
        if let Some(target) = &self.target {
            let _ = write!(line, " {target}:");
        }
        let _ = write!(line, " {}", self.message);
        for (k, v) in &self.fields {
            let _ = write!(line, " {k}={v}");
        }
        line
    }

    /// Renders the entry as a JSON object.
    #[must_use]
    pub fn render_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("t".to_string(), self.timestamp_ms.into());
        map.insert("l".to_string(), self.level.as_str().into());
        if let Some(target) = &self.target {
            map.insert("target".to_string(), target.as_str().into());
        }
        map.insert("msg".to_string(), self.message.as_str().into());
        for (k, v) in &self.fields {
            map.insert(k.clone(), v.as_str().into());
        }
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_text())
    }
}
