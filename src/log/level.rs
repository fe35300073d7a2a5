//! Logging severity levels.

use std::fmt;

/// Severity level for log entries.
///
/// Levels are ordered: Trace < Debug < Info < Warn < Error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Detailed tracing information (lowest priority).
    Trace,
    /// Debugging information.
    Debug,
    /// General informational messages (default).
    #[default]
    Info,
    /// Warning conditions that are not errors.
    Warn,
    /// Error conditions (highest priority).
    Error,
}

impl LogLevel {
    /// Returns true if this level is enabled given the threshold.
    #[must_use]
    pub fn is_enabled_at(self, threshold: Self) -> bool {
        self >= threshold
    }

    /// Parses a level name, case-insensitively.
    ///
    /// Unrecognized names fall back to [`LogLevel::Info`], matching the
    /// behavior of configuration sources that treat the level as a hint.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Returns a single-character representation (T, D, I, W, E).
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
