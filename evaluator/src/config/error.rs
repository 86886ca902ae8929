use std::path::PathBuf;
use thiserror::Error;

/// Configuration failures. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A layer could not be read or merged, or the merged tree does not fit
    /// [`AppConfig`](crate::config::AppConfig).
    #[error("Failed to build configuration: {0}")]
    Layering(#[from] config::ConfigError),

    #[error("Failed to encode configuration defaults: {0}")]
    Defaults(#[from] serde_json::Error),

    #[error("Missing required setting `{0}` (set it in normcheck.toml or pass it as a flag)")]
    MissingSetting(String),

    #[error("Configuration schema violation: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
