//! Toolkit configuration.
//!
//! This module provides:
//! - The application configuration type with sensible defaults
//! - Validation for the few hard requirements
//! - Layered loading (file < environment < programmatic overrides)
//!
//! Note: File parsing is intentionally minimal and deterministic —
//! `key = value` lines, `#` comments.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::log::{LogConfig, LogLevel};

/// Default HTTP listen address.
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:31234";
/// Default gRPC listen address.
pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:31233";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Service name; stamped on every log entry.
    pub name: String,
    /// Logging settings.
    pub log: LogConfig,
    /// HTTP listen address.
    pub http_addr: String,
    /// gRPC listen address.
    pub grpc_addr: String,
}

impl AppConfig {
    /// Creates a configuration with defaults for the given service name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            log: LogConfig {
                app: name.clone(),
                ..LogConfig::default()
            },
            name,
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            grpc_addr: DEFAULT_GRPC_ADDR.to_string(),
        }
    }

    /// Validates the configuration for basic sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        for addr in [&self.http_addr, &self.grpc_addr] {
            if !addr.contains(':') {
                return Err(ConfigError::InvalidAddr(addr.clone()));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new("svckit")
    }
}

/// Configuration loader with layered sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file_path: Option<PathBuf>,
    overrides: BTreeMap<String, String>,
}

impl ConfigLoader {
    /// Creates a new loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a file path for config loading.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Adds a programmatic override (highest precedence).
    #[must_use]
    pub fn override_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Loads configuration with precedence:
    /// 1. Defaults (lowest)
    /// 2. File config
    /// 3. Environment variables (`SVCKIT_*`)
    /// 4. Programmatic overrides (highest)
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();
        if let Some(path) = &self.file_path {
            apply_file(&mut config, path)?;
        }
        apply_env_overrides(&mut config)?;
        for (key, value) in &self.overrides {
            apply_key(&mut config, key, value)?;
        }
        if config.log.app.is_empty() {
            config.log.app = config.name.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error while reading configuration.
    Io(std::io::Error),
    /// Malformed line in a config file.
    Parse(String),
    /// Service name is empty.
    EmptyName,
    /// Listen address is not host:port shaped.
    InvalidAddr(String),
    /// Unrecognized configuration key.
    UnknownKey(String),
    /// A value failed to parse for its key.
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O error: {err}"),
            Self::Parse(line) => write!(f, "config parse error: {line}"),
            Self::EmptyName => write!(f, "service name must not be empty"),
            Self::InvalidAddr(addr) => write!(f, "listen address missing port: {addr}"),
            Self::UnknownKey(key) => write!(f, "unknown config key: {key}"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

fn apply_file(config: &mut AppConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Parse(line.to_string()));
        };
        apply_key(config, key.trim(), value.trim())?;
    }
    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    let mut overrides = BTreeMap::new();
    for (key, value) in std::env::vars() {
        if let Some(rest) = key.strip_prefix("SVCKIT_") {
            overrides.insert(rest.to_ascii_lowercase(), value);
        }
    }
    for (key, value) in &overrides {
        apply_key(config, key, value)?;
    }
    Ok(())
}

fn apply_key(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "name" => config.name = value.to_string(),
        "log_level" => config.log.level = LogLevel::parse(value),
        "log_dev" => {
            config.log.dev = match value {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                }
            };
        }
        "http_addr" => config.http_addr = value.to_string(),
        "grpc_addr" => config.grpc_addr = value.to_string(),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = AppConfig::default();
        config.validate().expect("defaults valid");
        assert_eq!(config.http_addr, DEFAULT_HTTP_ADDR);
        assert_eq!(config.log.app, "svckit");
    }

    #[test]
    fn empty_name_rejected() {
        let mut config = AppConfig::default();
        config.name.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyName)));
    }

    #[test]
    fn addr_without_port_rejected() {
        let mut config = AppConfig::default();
        config.http_addr = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAddr(_))
        ));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = ConfigLoader::new()
            .override_value("name", "orders")
            .override_value("log_level", "debug")
            .override_value("log_dev", "true")
            .load()
            .expect("load");

        assert_eq!(config.name, "orders");
        assert_eq!(config.log.level, LogLevel::Debug);
        assert!(config.log.dev);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ConfigLoader::new()
            .override_value("tls_cert", "x")
            .load()
            .expect_err("unknown key");
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn bad_bool_rejected() {
        let err = ConfigLoader::new()
            .override_value("log_dev", "maybe")
            .load()
            .expect_err("bad bool");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn file_layer_parses_key_value_lines() {
        let dir = std::env::temp_dir().join("svckit-config-test");
        std::fs::create_dir_all(&dir).expect("tmp dir");
        let path = dir.join("app.conf");
        std::fs::write(
            &path,
            "# service settings\nname = billing\nhttp_addr = 127.0.0.1:8080\n\n",
        )
        .expect("write conf");

        let config = ConfigLoader::new().file(&path).load().expect("load");
        assert_eq!(config.name, "billing");
        assert_eq!(config.http_addr, "127.0.0.1:8080");
        assert_eq!(config.log.app, "billing");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn malformed_file_line_rejected() {
        let dir = std::env::temp_dir().join("svckit-config-test");
        std::fs::create_dir_all(&dir).expect("tmp dir");
        let path = dir.join("bad.conf");
        std::fs::write(&path, "name billing\n").expect("write conf");

        let err = ConfigLoader::new().file(&path).load().expect_err("parse");
        assert!(matches!(err, ConfigError::Parse(_)));

        std::fs::remove_file(&path).ok();
    }
}
