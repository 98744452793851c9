//! Configuration management and validation.
//!
//! Provides the client configuration (API location, campaign credentials,
//! endpoint paths, default report window, session file) and its layered
//! loading: defaults, then a JSON file, then environment variables, then
//! CLI overrides applied by the caller.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_CAMPAIGN, DEFAULT_REPORT_END,
    DEFAULT_REPORT_START, SESSION_FILE_NAME, endpoints, env_vars,
};
use crate::error::{KpiGameError, Result};
use crate::models::DateRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Endpoint paths relative to the base URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub login: String,
    pub signup: String,
    pub logout: String,
    pub report: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            login: endpoints::LOGIN.to_string(),
            signup: endpoints::SIGNUP.to_string(),
            logout: endpoints::LOGOUT.to_string(),
            report: endpoints::REPORT.to_string(),
        }
    }
}

/// Global configuration for the KPI Game client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the campaign API
    pub base_url: String,

    /// API key embedded in every request body
    pub api_key: String,

    /// Campaign identifier embedded in every request body
    pub campaign: String,

    /// Endpoint paths
    pub endpoints: EndpointConfig,

    /// Reporting window used when the dashboard is not given one
    pub report_window: DateRange,

    /// Session file override (defaults to the user data directory)
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            campaign: DEFAULT_CAMPAIGN.to_string(),
            endpoints: EndpointConfig::default(),
            report_window: default_report_window(),
            session_file: None,
        }
    }
}

fn default_report_window() -> DateRange {
    DateRange::parse(DEFAULT_REPORT_START, DEFAULT_REPORT_END).unwrap_or_else(|_| {
        let day = chrono::NaiveDate::default();
        DateRange {
            start: day,
            end: day,
        }
    })
}

impl ClientConfig {
    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the campaign identifier
    pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.campaign = campaign.into();
        self
    }

    /// Set the session file location
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Set the default reporting window
    pub fn with_report_window(mut self, window: DateRange) -> Self {
        self.report_window = window;
        self
    }

    /// Default config file location: `<config dir>/kpi-game/config.json`
    pub fn default_config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            KpiGameError::configuration("Could not determine user config directory")
        })?;
        Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Default session file location: `<data dir>/kpi-game/session.json`
    pub fn default_session_path() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or_else(|| KpiGameError::configuration("Could not determine user data directory"))?;
        Ok(dir.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
    }

    /// Session file in effect
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => Self::default_session_path(),
        }
    }

    /// Read a configuration file; fields absent from it keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KpiGameError::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            KpiGameError::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Defaults, then `config_file` (or the default file when it exists), then environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        Self::load_layered_with(config_file, |name| std::env::var(name).ok())
    }

    /// [`ClientConfig::load_layered`] with environment lookups through `lookup`
    pub fn load_layered_with<F>(config_file: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_file {
            Some(path) => {
                info!("Using config file: {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    info!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                _ => {
                    info!("No config file found, using defaults and environment variables");
                    Self::default()
                }
            },
        };

        config.apply_env(lookup);
        debug!("Loaded configuration for campaign '{}'", config.campaign);
        Ok(config)
    }

    /// Apply environment overrides through `lookup`; blank values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = get(env_vars::BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_key) = get(env_vars::API_KEY) {
            self.api_key = api_key;
        }
        if let Some(campaign) = get(env_vars::CAMPAIGN) {
            self.campaign = campaign;
        }
        if let Some(session_file) = get(env_vars::SESSION_FILE) {
            self.session_file = Some(PathBuf::from(session_file));
        }
    }

    /// Check the configuration before any request is issued
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            KpiGameError::configuration(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(KpiGameError::configuration(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(KpiGameError::configuration(format!(
                "API key is not set (config file field 'api_key' or {})",
                env_vars::API_KEY
            )));
        }

        if self.campaign.trim().is_empty() {
            return Err(KpiGameError::configuration("Campaign identifier is empty"));
        }

        if self.report_window.start > self.report_window.end {
            return Err(KpiGameError::invalid_date_range(format!(
                "configured report window {} is inverted",
                self.report_window
            )));
        }

        Ok(())
    }
}
