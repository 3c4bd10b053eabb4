use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    IO {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config value '{0}' is missing or empty")]
    Missing(&'static str),
    #[error("Config value '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("Source kind 'browser' needs the crate to be built with the 'browser' feature")]
    BrowserUnsupported,
}
