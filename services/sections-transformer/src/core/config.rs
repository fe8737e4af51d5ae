//! Configuration management for the sections transformer.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, TransformerError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory name under the XDG config home
const APP_DIR: &str = "sections-transformer";

/// Legacy config file looked up in the working directory
const LEGACY_CONFIG_FILE: &str = "sections-transformer.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// TME source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// TME REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Taxonomy (authority) to load
    #[serde(default = "default_taxonomy_name")]
    pub taxonomy_name: String,

    /// Terms requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = TransformerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TransformerError::ConfigError(format!(
                "Unknown log format '{other}' (expected 'pretty' or 'json')"
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_taxonomy_name() -> String {
    "Sections".to_string()
}

fn default_page_size() -> usize {
    10_000
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            taxonomy_name: default_taxonomy_name(),
            page_size: default_page_size(),
            timeout_sec: default_timeout(),
            username: None,
            password: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TransformerError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// XDG config file location (`$XDG_CONFIG_HOME/sections-transformer/config.toml`)
    pub fn xdg_config_file() -> Option<PathBuf> {
        let base = match env::var("XDG_CONFIG_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()?,
        };
        Some(base.join(APP_DIR).join("config.toml"))
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File lookup order:
    /// 1. `explicit` path (from the command line)
    /// 2. SECTIONS_CONFIG env var
    /// 3. XDG config file
    /// 4. Legacy ./sections-transformer.toml
    /// 5. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(config_path) = env::var("SECTIONS_CONFIG") {
            Self::from_file(config_path)?
        } else {
            match Self::xdg_config_file().filter(|p| p.exists()) {
                Some(xdg_config) => Self::from_file(xdg_config)?,
                None if Path::new(LEGACY_CONFIG_FILE).exists() => Self::from_file(LEGACY_CONFIG_FILE)?,
                None => Self::default(),
            }
        };

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        // Server configuration
        if let Ok(host) = env::var("SECTIONS_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SECTIONS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Source configuration
        if let Ok(url) = env::var("SECTIONS_TME_BASE_URL") {
            self.source.base_url = url;
        }
        if let Ok(name) = env::var("SECTIONS_TAXONOMY_NAME") {
            self.source.taxonomy_name = name;
        }
        if let Ok(page_size) = env::var("SECTIONS_TME_PAGE_SIZE") {
            if let Ok(size) = page_size.parse() {
                self.source.page_size = size;
            }
        }
        if let Ok(timeout) = env::var("SECTIONS_TME_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.source.timeout_sec = t;
            }
        }
        if let Ok(user) = env::var("SECTIONS_TME_USERNAME") {
            self.source.username = Some(user);
        }
        if let Ok(password) = env::var("SECTIONS_TME_PASSWORD") {
            self.source.password = Some(password);
        }

        // Logging configuration
        if let Ok(format) = env::var("SECTIONS_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TransformerError::ConfigError(
                "Port must be non-zero".to_string(),
            ));
        }

        if self.source.base_url.trim().is_empty() {
            return Err(TransformerError::ConfigError(
                "TME base URL cannot be empty".to_string(),
            ));
        }

        if self.source.taxonomy_name.trim().is_empty() {
            return Err(TransformerError::ConfigError(
                "Taxonomy name cannot be empty".to_string(),
            ));
        }

        if self.source.page_size == 0 {
            return Err(TransformerError::ConfigError(
                "Page size must be non-zero".to_string(),
            ));
        }

        if self.source.timeout_sec == 0 {
            return Err(TransformerError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}:{}", self.server.host, self.server.port);
        tracing::info!("  TME base URL: {}", self.source.base_url);
        tracing::info!("  Taxonomy: {}", self.source.taxonomy_name);
        tracing::info!("  Page size: {}", self.source.page_size);
        tracing::info!("  Request timeout: {}s", self.source.timeout_sec);
        tracing::info!(
            "  TME credentials: {}",
            if self.source.username.is_some() {
                "configured"
            } else {
                "none"
            }
        );
        tracing::info!("  Log format: {:?}", self.logging.format);
    }
}
