//! Transport seam.
//!
//! The app lifecycle drives servers only through this trait; the concrete
//! HTTP and gRPC implementations live in the hosting framework.

use std::fmt;

/// The kind of transport a server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerKind {
    /// HTTP server.
    Http,
    /// gRPC server.
    Grpc,
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "HTTP"),
            Self::Grpc => write!(f, "gRPC"),
        }
    }
}

/// A startable/stoppable transport server.
pub trait Server: Send {
    /// Returns the transport kind, for logs and error reports.
    fn kind(&self) -> ServerKind;

    /// Starts serving. Must return promptly; serving happens on the
    /// server's own threads.
    fn start(&mut self) -> Result<(), ServeError>;

    /// Stops serving and releases resources.
    fn stop(&mut self) -> Result<(), ServeError>;
}

/// Error raised by a server while starting or stopping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeError {
    message: String,
}

impl ServeError {
    /// Creates a serve error with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ServeError {}
