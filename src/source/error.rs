use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GET '{url}' answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("Timed out after {0} seconds")]
    Timeout(u64),
    #[cfg(feature = "browser")]
    #[error("Failed to start WebDriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),
    #[cfg(feature = "browser")]
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),
}
