//! Configuration management for payweb
//!
//! This module handles loading, validation, and management of
//! payweb configuration from YAML files and the environment.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Environment variable that overrides `upstream.base_url`
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Upstream base URL used when neither the config file nor the environment sets one
pub const DEFAULT_BASE_URL: &str = "https://recruit.paysbypays.com/api/v1";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Upstream payments API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL the payment and catalog endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Offset from UTC, in minutes, used to show payment timestamps and to
    /// interpret timestamps that carry no offset of their own
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

fn default_utc_offset() -> i32 {
    // KST
    9 * 60
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the given path; built-in defaults were used
    Defaults,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise start from defaults.
    /// The environment override is applied in both cases.
    pub fn load_or_default(path: &Path) -> ConfigResult<(Self, ConfigSource)> {
        let (mut config, source) = if path.exists() {
            (Self::load(path)?, ConfigSource::File(path.to_path_buf()))
        } else {
            (Self::default(), ConfigSource::Defaults)
        };
        config.apply_env_override(std::env::var(BASE_URL_ENV).ok());
        config.validate()?;
        Ok((config, source))
    }

    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document is a valid, all-default configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Replace the upstream base URL with a non-empty override value
    pub fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            log::debug!("Upstream base URL overridden by {}: {}", BASE_URL_ENV, url);
            self.upstream.base_url = url;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = &self.upstream.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "upstream.base_url".to_string(),
                reason: format!("Expected an http(s) URL, got '{}'", base_url),
            });
        }

        if self.display.utc_offset_minutes.abs() > 18 * 60 {
            return Err(ConfigError::InvalidValue {
                field: "display.utc_offset_minutes".to_string(),
                reason: "Offset must be within ±18 hours".to_string(),
            });
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.upstream.base_url.trim_end_matches('/')
    }
}

/// Default config file location, relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yaml")
}
