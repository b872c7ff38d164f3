//! Server configuration from TOML or environment

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default host address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port number
pub const DEFAULT_PORT: u16 = 5002;

/// Wildcard origin allowing any caller
pub const ANY_ORIGIN: &str = "*";

/// Default CORS origins (any)
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[ANY_ORIGIN];

/// Accepted log levels
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Values given explicitly on the command line
///
/// Each set field wins over the environment, the config file and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Host to bind
    pub host: Option<String>,

    /// Port to bind
    pub port: Option<u16>,

    /// Log level
    pub log_level: Option<String>,
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Allowed CORS origins, `"*"` allows any
    pub cors_origins: Vec<String>,

    /// Enable request logging
    pub enable_logging: bool,

    /// Log level for tracing
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            cors_origins: Self::default_cors_origins(),
            enable_logging: Self::default_logging(),
            log_level: Self::default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Default host value
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    /// Default port value
    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    /// Default CORS origins
    fn default_cors_origins() -> Vec<String> {
        DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
    }

    /// Default logging enabled
    fn default_logging() -> bool {
        true
    }

    /// Default log level
    fn default_log_level() -> String {
        "info".to_string()
    }

    /// Load config from a TOML file
    ///
    /// Keys missing from the file keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config failed: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parse toml failed: {}", path.display()))
    }

    /// Load config from environment variables with fallback to defaults
    ///
    /// Environment variables:
    /// - `LESERVE_HOST` - Server host
    /// - `LESERVE_PORT` - Server port
    /// - `LESERVE_CORS_ORIGINS` - Comma separated origins
    /// - `LESERVE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `LESERVE_*` environment variables on top of this config
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply `LESERVE_*` variables read through `lookup`
    ///
    /// An unparsable `LESERVE_PORT` is ignored.
    #[must_use]
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("LESERVE_HOST") {
            self.host = host;
        }

        if let Some(port_str) = lookup("LESERVE_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                self.port = port;
            }
        }

        if let Some(origins) = lookup("LESERVE_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(log_level) = lookup("LESERVE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Apply explicit overrides on top of this config
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        self
    }

    /// Resolve config: overrides > environment > file > defaults
    pub fn layered(file: Option<&Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        Self::layered_with(file, overrides, |key| std::env::var(key).ok())
    }

    /// [`ServerConfig::layered`] with the environment read through `lookup`
    pub fn layered_with(
        file: Option<&Path>,
        overrides: &ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let base = match file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };

        Ok(base.with_vars(lookup).with_overrides(overrides))
    }

    /// Whether every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }

    /// Get the full server URL
    ///
    /// # Returns
    ///
    /// Formatted URL string (e.g., "http://0.0.0.0:5002")
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be zero".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.cors_origins.is_empty() {
            return Err("At least one CORS origin is required".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }
}
