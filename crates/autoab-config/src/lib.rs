//! Configuration loading for autoab.
//! Reads autoab.toml from the current directory or the path in the AUTOAB_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "AUTOAB_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "autoab.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub facets: FacetsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url()     -> String { "http://localhost:5000/api".to_string() }
fn default_timeout_secs() -> u64    { 30 }

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetsConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Sent as `limit` when every matching entry is wanted on one page.
    #[serde(default = "default_unbounded_limit")]
    pub unbounded_page_limit: u64,
}

fn default_page_size()       -> u64 { 10 }
fn default_unbounded_limit() -> u64 { 100_000 }

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            unbounded_page_limit: default_unbounded_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Float Ro52/SSA spellings to the top of autoantibody suggestions.
    #[serde(default)]
    pub legacy_ro52_priority: bool,
}

fn default_debounce_ms()   -> u64   { 300 }
fn default_min_query_len() -> usize { 2 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            legacy_ro52_priority: false,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

fn default_ttl_hours() -> u64 { 24 }

/// Upper bound on `reports.ttl_hours` (one hundred years).
pub const MAX_REPORT_TTL_HOURS: u64 = 24 * 365 * 100;

impl Default for ReportsConfig {
    fn default() -> Self {
        Self { ttl_hours: default_ttl_hours() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "autoab=info,warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}


impl Config {
    /// Load configuration from autoab.toml.
    /// Checks AUTOAB_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        tracing::debug!(path = %path.display(), "Reading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend.base_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.facets.default_page_size == 0 {
            return Err(ConfigError::Invalid("facets.default_page_size must be positive".into()));
        }
        if self.facets.unbounded_page_limit < self.facets.default_page_size {
            return Err(ConfigError::Invalid(
                "facets.unbounded_page_limit must be at least facets.default_page_size".into(),
            ));
        }
        if self.reports.ttl_hours > MAX_REPORT_TTL_HOURS {
            return Err(ConfigError::Invalid(format!(
                "reports.ttl_hours must be at most {MAX_REPORT_TTL_HOURS}, got {}",
                self.reports.ttl_hours
            )));
        }
        Ok(())
    }
}
