//! Server configuration
//!
//! Loads and parses the `atelier-server.toml` configuration file with
//! bind address and executor settings. The path comes from the
//! `ATELIER_CONFIG` environment variable, falling back to
//! `config/atelier-server.toml`; a missing file yields the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Config file is not valid TOML
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default configuration file path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/atelier-server.toml";

/// Top-level server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP bind settings
    #[serde(default)]
    pub server: BindConfig,
    /// Executor settings
    #[serde(default)]
    pub executor: ExecutorConfig,
}

/// HTTP bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Server display name, reported in logs
    pub name: String,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            name: "atelier-server".to_string(),
        }
    }
}

/// Executor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Simulated per-phase delay in milliseconds
    pub phase_delay_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { phase_delay_ms: 1000 }
    }
}

impl ExecutorConfig {
    /// Per-phase delay as a `Duration`
    pub fn phase_delay(&self) -> Duration {
        Duration::from_millis(self.phase_delay_ms)
    }
}

impl ServerConfig {
    /// Load configuration from `ATELIER_CONFIG` or the default path
    ///
    /// A missing file is not an error; defaults apply. Read and parse
    /// failures of an existing file are reported.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("ATELIER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Load configuration from an explicit path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = ServerConfig::load_from("/nonexistent/atelier-server.toml").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.executor.phase_delay_ms, 1000);
    }

    #[test]
    fn parses_toml_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9090\nname = \"test\"\n\n[executor]\nphase_delay_ms = 5"
        )
        .unwrap();

        let config = ServerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.executor.phase_delay(), Duration::from_millis(5));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[executor]\nphase_delay_ms = 50").unwrap();

        let config = ServerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.executor.phase_delay_ms, 50);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport=").unwrap();

        let err = ServerConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
