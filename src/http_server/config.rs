//! Service Configuration
//!
//! Configuration for the HTTP server, the backing store and CORS settings.
//! Values come from defaults, an optional JSON file, and finally the
//! environment or command line (applied by the CLI).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rest_api::PageLimits;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Pool size (default: 10)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// CORS allowed origins; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Items returned by list when no limit is given (default: 10)
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Largest accepted list limit (default: 1000)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://items.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_log_filter() -> String {
    "itemstore=info,tower_http=info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            cors_origins: default_cors_origins(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file; missing keys take defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }

        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must be set".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::Invalid("max_connections must be > 0".to_string()));
        }

        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid("default_page_size must be > 0".to_string()));
        }

        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.default_page_size,
            max_limit: self.max_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.default_page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("itemstore.json");
        fs::write(&path, r#"{"port": 9000, "cors_origins": []}"#).unwrap();

        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.database_url, default_database_url());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = ServiceConfig::load(&tmp.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_validate_page_sizes() {
        let config = ServiceConfig {
            default_page_size: 50,
            max_page_size: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
