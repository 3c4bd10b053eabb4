#[cfg(feature = "browser")]
mod browser;
mod error;
mod http;

#[cfg(feature = "browser")]
pub use browser::BrowserSource;
pub use error::FetchError;
pub use http::HttpSource;

use crate::config::{ConfigError, SourceConfig, SourceKind};
use async_trait::async_trait;

/// How the raw content handed out by a [`Source`] has to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// A page carrying the catalogs in an embedded `<script>` JSON block.
    Html,
    /// The catalogs payload itself.
    Json,
}

#[async_trait]
pub trait Source: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;

    fn format(&self) -> PayloadFormat;
}

pub fn from_config(config: &SourceConfig) -> Result<Box<dyn Source>, ConfigError> {
    match config.kind {
        SourceKind::Html | SourceKind::Api => Ok(Box::new(HttpSource::new(config)?)),
        #[cfg(feature = "browser")]
        SourceKind::Browser => Ok(Box::new(BrowserSource::new(config))),
        #[cfg(not(feature = "browser"))]
        SourceKind::Browser => Err(ConfigError::BrowserUnsupported),
    }
}
