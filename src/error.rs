use crate::config::ConfigError;
use crate::extractor::ExtractError;
use crate::notifier::NotifyError;
use crate::source::FetchError;
use crate::state::StateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Get URL error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Error getting articles: {0}")]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
