//! Client configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use alexandria_core::{HttpConfig, RetryPolicy};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Public API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

/// Client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// Contact address sent as `mailto`, which routes requests to the polite pool
    #[serde(deserialize_with = "deserialize_env_var")]
    pub email: Option<String>,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
    pub http: HttpSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: std::env::var("OPENALEX_EMAIL").ok(),
            api_key: std::env::var("OPENALEX_API_KEY").ok(),
            http: HttpSettings::default(),
        }
    }
}

/// `[http]` table: timeouts in seconds and retry behaviour
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpSettings {
    pub connect_timeout: u64,
    pub read_timeout: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub retry_status_codes: Vec<u16>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            connect_timeout: 30,
            read_timeout: 60,
            max_retries: retry.max_retries,
            backoff_factor: retry.backoff_factor,
            retry_status_codes: retry.retry_status_codes,
        }
    }
}

impl HttpSettings {
    pub fn to_http_config(&self) -> HttpConfig {
        HttpConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            read_timeout: Duration::from_secs(self.read_timeout),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                backoff_factor: self.backoff_factor,
                retry_status_codes: self.retry_status_codes.clone(),
            },
            ..HttpConfig::default()
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./alexandria.toml (current directory)
    /// 2. ~/.config/alexandria/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("alexandria.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "alexandria") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Set the polite-pool contact address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
