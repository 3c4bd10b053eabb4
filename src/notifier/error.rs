use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Error sending telegram message: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram rejected message ({status}): {description}")]
    Rejected {
        status: StatusCode,
        description: String,
    },
}
