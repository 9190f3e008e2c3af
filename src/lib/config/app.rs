use super::defaults::{
    DEFAULT_ASSISTANT_LABEL, DEFAULT_BASE_URL, DEFAULT_GREETING, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SHOW_COMPANY,
};
use super::error::ConfigError;
use super::loader::RawConfig;
use crate::domain::ResponseShape;
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from client.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub response_shape: ResponseShape,
    pub assistant_label: String,
    pub greeting: String,
    pub show_company: bool,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            response_shape: ResponseShape::default(),
            assistant_label: DEFAULT_ASSISTANT_LABEL.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            show_company: DEFAULT_SHOW_COMPANY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        shape: Option<ResponseShape>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.base_url = url.trim().to_string();
        }
        if let Some(shape) = shape {
            self.response_shape = shape;
        }
        self.validate()?;
        Ok(self)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
            });
        }
        if self.assistant_label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_raw_toml(&self) -> Result<String, ConfigError> {
        let raw = RawConfig::from(self);
        Ok(toml::to_string_pretty(&raw)?)
    }
}
