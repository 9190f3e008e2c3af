use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("base_url '{url}' must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    #[error("assistant_label must not be empty")]
    EmptyLabel,

    #[error("failed to render config as TOML: {0}")]
    Render(#[from] toml::ser::Error),
}
