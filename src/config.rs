use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "OTPGATE_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the authentication API (`/verify-otp` is joined onto it)
    pub base_url: String,
    /// Public URL of the web app; the dashboard destination is built from it
    pub app_url: Option<String>,
    /// Route the user is sent to after a successful verification
    pub dashboard_path: String,
    /// JSON file holding the session written by the preceding login step
    pub session_file: Option<PathBuf>,
    /// Seconds a status banner stays visible
    pub banner_ttl_secs: u64,
    /// Seconds between a successful verification and the redirect
    pub redirect_delay_secs: u64,
    /// Timeout for the verification request
    pub request_timeout_secs: u64,
    /// Return to the form after a failed verification instead of keeping
    /// the loading placeholder up
    pub release_on_failure: bool,
    /// Where logs go while the terminal UI owns the screen
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            app_url: None,
            dashboard_path: "/dashboard".to_string(),
            session_file: None,
            banner_ttl_secs: 5,
            redirect_delay_secs: 5,
            request_timeout_secs: 30,
            release_on_failure: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Default settings directory (`~/.otpgate`).
    pub fn settings_dir() -> PathBuf {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home_dir.join(".otpgate")
    }

    /// Default config file (`~/.otpgate/config.toml`).
    pub fn default_path() -> PathBuf {
        Self::settings_dir().join("config.toml")
    }

    /// Load configuration from file, then apply environment overrides.
    ///
    /// A missing file yields the defaults. The result is not validated:
    /// command-line overrides still apply on top, so call [`Config::validate`]
    /// once they have.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Config::default()
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Check that the configured URLs are usable http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_http_url("base_url", &self.base_url)?;
        if let Some(app_url) = &self.app_url {
            parse_http_url("app_url", app_url)?;
        }
        Ok(())
    }

    /// Full URL of the verification endpoint.
    pub fn verify_url(&self) -> String {
        format!("{}/verify-otp", self.base_url.trim_end_matches('/'))
    }

    /// Where the user ends up after the redirect: the dashboard path joined
    /// onto `app_url` when one is configured, the bare path otherwise.
    pub fn destination(&self, path: &str) -> String {
        match &self.app_url {
            Some(app_url) => format!("{}{}", app_url.trim_end_matches('/'), path),
            None => path.to_string(),
        }
    }

    pub fn banner_ttl(&self) -> Duration {
        Duration::from_secs(self.banner_ttl_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_secs(self.redirect_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_http_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
