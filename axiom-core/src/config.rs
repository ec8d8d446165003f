//! Configuration for axiom

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Environment variable overriding `source.base_url`
pub const SOURCE_URL_ENV: &str = "AXIOM_SOURCE_URL";

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxiomConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Email analysis backend
    pub source: SourceConfig,
    /// Snapshot cache
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Email source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Base URL of the email analysis backend (e.g., "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Read emails from this JSON file instead of the backend
    pub fixture_path: Option<String>,
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// JSON file backing the cache. In-memory when unset.
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl AxiomConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DashboardError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default development configuration
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: "127.0.0.1:8080".to_string(),
            },
            source: SourceConfig {
                base_url: default_base_url(),
                timeout_seconds: default_timeout(),
                fixture_path: None,
            },
            cache: CacheConfig {
                path: Some("axiom-cache.json".to_string()),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Apply environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            if !url.trim().is_empty() {
                self.source.base_url = url;
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.source.timeout_seconds == 0 {
            return Err(DashboardError::Config(
                "source.timeout_seconds must be greater than 0".to_string(),
            ));
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(DashboardError::Config(format!(
                "Unknown logging format: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = AxiomConfig::from_toml(
            r#"
            [server]
            listen_addr = "0.0.0.0:9000"

            [source]
            base_url = "http://backend:5000"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.source.base_url, "http://backend:5000");
        assert_eq!(config.source.timeout_seconds, 120);
        assert!(config.source.fixture_path.is_none());
        assert!(config.cache.path.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_parse_full_config() {
        let config = AxiomConfig::from_toml(
            r#"
            [server]
            listen_addr = "127.0.0.1:8081"

            [source]
            timeout_seconds = 10
            fixture_path = "emails.json"

            [cache]
            path = "/tmp/axiom.json"

            [logging]
            level = "axiom_core=debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.base_url, "http://localhost:5000");
        assert_eq!(config.source.timeout_seconds, 10);
        assert_eq!(config.source.fixture_path.as_deref(), Some("emails.json"));
        assert_eq!(config.cache.path.as_deref(), Some("/tmp/axiom.json"));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = AxiomConfig::from_toml(
            r#"
            [server]
            listen_addr = "127.0.0.1:8081"

            [source]
            timeout_seconds = 0
            "#,
        );
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let result = AxiomConfig::from_toml(
            r#"
            [server]
            listen_addr = "127.0.0.1:8081"

            [source]

            [logging]
            format = "xml"
            "#,
        );
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AxiomConfig::from_file(Path::new("/nonexistent/axiom.toml"));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
