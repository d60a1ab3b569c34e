//! Configuration management for Chaser-Exec

use crate::protocol::ElementKey;
use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WebDriver server base URL
    pub webdriver_url: String,

    /// Session to issue commands against
    pub session_id: Option<String>,

    /// Sessions started in multi-instance mode cannot receive function values,
    /// so scripts starting with `function (` are wrapped as well
    pub multi_instance: bool,

    /// WebElement marker dialect
    pub element_key: ElementKey,

    /// HTTP request timeout in milliseconds
    pub request_timeout: u64,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            session_id: None,
            multi_instance: false,
            element_key: ElementKey::W3c,
            request_timeout: 30000,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Config::default().with_env_overrides()
    }

    /// Apply `CHASER_*` environment variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        let mut config = self;

        if let Ok(url) = env::var("CHASER_WEBDRIVER_URL") {
            config.webdriver_url = url;
        }

        if let Ok(session_id) = env::var("CHASER_SESSION_ID") {
            config.session_id = Some(session_id);
        }

        if let Ok(multi) = env::var("CHASER_MULTI_INSTANCE") {
            config.multi_instance = multi
                .parse()
                .map_err(|_| Error::configuration("Invalid CHASER_MULTI_INSTANCE"))?;
        }

        if let Ok(key) = env::var("CHASER_ELEMENT_KEY") {
            config.element_key = key
                .parse()
                .map_err(|_| Error::configuration("Invalid CHASER_ELEMENT_KEY"))?;
        }

        if let Ok(timeout) = env::var("CHASER_REQUEST_TIMEOUT") {
            config.request_timeout = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid CHASER_REQUEST_TIMEOUT"))?;
        }

        if let Ok(log_level) = env::var("CHASER_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))
    }
}
