//! Centralized configuration management for futurama-roster

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::FuturamaApi;

const DEFAULT_LOG_FILE: &str = "futurama_roster.log";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Futurama API (scheme and host, no path)
    pub api_base_url: String,
    /// File receiving the application log
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// User agent string; `None` sends no User-Agent header
    pub user_agent: Option<String>,
    /// Ignore proxy settings from the environment
    pub no_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: FuturamaApi::BASE_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("FUTURAMA_API_URL")
            .unwrap_or_else(|_| FuturamaApi::BASE_URL.to_string());

        let log_file = std::env::var("FUTURAMA_LOG_FILE")
            .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("FUTURAMA_HTTP_TIMEOUT_SECONDS")?,
            user_agent: std::env::var("FUTURAMA_USER_AGENT").ok(),
            no_proxy: parse_env_var("FUTURAMA_NO_PROXY")?.unwrap_or(false),
        };

        Ok(Config {
            api_base_url,
            log_file,
            http,
        })
    }

    /// Get HTTP timeout as Duration, if one is configured
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    /// Directory and file name of the log file, as the appender wants them
    pub fn log_file_parts(&self) -> Result<(PathBuf, PathBuf)> {
        let file_name = self
            .log_file
            .file_name()
            .with_context(|| format!("Log file path has no file name: {}", self.log_file.display()))?;
        let dir = match self.log_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        Ok((dir, PathBuf::from(file_name)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "API base URL must start with http:// or https://: {}",
                self.api_base_url
            ));
        }

        if self.http.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!(
                "HTTP timeout must be at least one second; unset it to disable the timeout"
            ));
        }

        let (dir, _) = self.log_file_parts()?;
        if !dir.exists() {
            return Err(anyhow::anyhow!(
                "Log file directory does not exist: {}",
                dir.display()
            ));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
