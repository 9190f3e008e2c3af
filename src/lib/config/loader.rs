use super::AppConfig;
use super::CONFIG_PATH;
use super::defaults::DEFAULT_ENV_PATH;
use super::error::ConfigError;
use crate::domain::ResponseShape;
use dotenvy::from_filename;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for (de)serialization from TOML
#[derive(Debug, Deserialize, Serialize, Default)]
pub(super) struct RawConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_shape: Option<ResponseShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_company: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl From<&AppConfig> for RawConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: Some(config.base_url.clone()),
            response_shape: Some(config.response_shape),
            assistant_label: Some(config.assistant_label.clone()),
            greeting: Some(config.greeting.clone()),
            show_company: Some(config.show_company),
            request_timeout_secs: config.request_timeout.map(|t| t.as_secs()),
        }
    }
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(DEFAULT_ENV_PATH);
    });
}

/// Load and validate configuration from a file path.
///
/// An explicit path must exist; a missing default file yields the
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            match read_config(default_path) {
                Err(ConfigError::NotFound { .. }) => {
                    debug!(path = %default_path.display(), "No configuration file, using defaults");
                    Ok(AppConfig::default())
                }
                other => other,
            }
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading client configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let config = AppConfig {
        base_url: parsed
            .base_url
            .map(|url| url.trim().to_string())
            .unwrap_or(defaults.base_url),
        response_shape: parsed.response_shape.unwrap_or(defaults.response_shape),
        assistant_label: parsed.assistant_label.unwrap_or(defaults.assistant_label),
        greeting: parsed.greeting.unwrap_or(defaults.greeting),
        show_company: parsed.show_company.unwrap_or(defaults.show_company),
        request_timeout: parsed
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .or(defaults.request_timeout),
    };
    config.validate()?;
    Ok(config)
}
