//! Application lifecycle.
//!
//! An [`App`] owns the service's transport servers and starts and stops
//! them as a unit. Construction from an [`AppConfig`] also installs the
//! process-global logger, which is the usual bootstrap order: config,
//! then logging, then servers.

use std::fmt;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::log::{self, Logger};
use crate::transport::{ServeError, Server, ServerKind};

/// A service application: a name plus its transport servers.
pub struct App {
    name: String,
    servers: Vec<Box<dyn Server>>,
    logger: Arc<Logger>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("servers", &self.servers.len())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates an app with an explicit logger.
    #[must_use]
    pub fn new(name: impl Into<String>, logger: Arc<Logger>) -> Self {
        Self {
            name: name.into(),
            servers: Vec::new(),
            logger,
        }
    }

    /// Creates an app from configuration, installing the global logger.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        log::init_global(&config.log);
        Self::new(&config.name, log::global())
    }

    /// Adds a server to the app.
    #[must_use]
    pub fn with_server(mut self, server: Box<dyn Server>) -> Self {
        self.servers.push(server);
        self
    }

    /// Returns the app name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starts every server, in registration order.
    ///
    /// The first failure aborts the startup; servers started before the
    /// failure keep running and should be torn down with [`App::stop`].
    pub fn run(&mut self) -> Result<(), AppError> {
        for server in &mut self.servers {
            let kind = server.kind();
            server
                .start()
                .map_err(|source| AppError::Start { kind, source })?;
        }
        self.logger.info(format!("app {} running", self.name));
        Ok(())
    }

    /// Stops every server, in reverse registration order.
    pub fn stop(&mut self) -> Result<(), AppError> {
        for server in self.servers.iter_mut().rev() {
            let kind = server.kind();
            server
                .stop()
                .map_err(|source| AppError::Stop { kind, source })?;
        }
        Ok(())
    }
}

/// Application lifecycle errors.
#[derive(Debug)]
pub enum AppError {
    /// A server failed to start.
    Start {
        /// The transport that failed.
        kind: ServerKind,
        /// The underlying failure.
        source: ServeError,
    },
    /// A server failed to stop.
    Stop {
        /// The transport that failed.
        kind: ServerKind,
        /// The underlying failure.
        source: ServeError,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { kind, source } => write!(f, "error start server({kind}): {source}"),
            Self::Stop { kind, source } => write!(f, "error stop server({kind}): {source}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Start { source, .. } | Self::Stop { source, .. } => Some(source),
        }
    }
}
