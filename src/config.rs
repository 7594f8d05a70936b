//! Configuration management for node_status
//!
//! Settings come from an optional TOML file; everything has a default so the
//! tool works with no file at all. CLI flags override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::ClientConfig;
use crate::constants::{config as config_paths, http, logging, progress};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Report display settings
    pub display: DisplayConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout, e.g. "30s"
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout, e.g. "10s"
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_nodelay: true,
            user_agent: None,
        }
    }
}

/// Report display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use ASCII glyphs for progress bars and table borders
    pub ascii: bool,
    /// Progress bar width in cells
    pub bar_width: usize,
    /// Show per-record detail fields
    pub verbose: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            ascii: false,
            bar_width: progress::REPORT_WIDTH,
            verbose: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no CLI verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            tcp_nodelay: self.tcp_nodelay,
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, else the first file found in the
    ///    standard locations)
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        let config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(config_paths::LOCAL_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(config_paths::APP_DIR)
                .join(config_paths::FILE_NAME)
        })
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> ConfigResult<()> {
        if self.display.bar_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.bar_width".to_string(),
                value: "0".to_string(),
                reason: "Bar width must be greater than 0".to_string(),
            });
        }
        if self.display.bar_width > progress::MAX_WIDTH {
            return Err(ConfigError::InvalidValue {
                field: "display.bar_width".to_string(),
                value: self.display.bar_width.to_string(),
                reason: format!("Bar width must be at most {}", progress::MAX_WIDTH),
            });
        }
        if self.client.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "client.request_timeout".to_string(),
                value: "0s".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
