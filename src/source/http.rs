use super::{FetchError, PayloadFormat, Source};
use crate::config::{ConfigError, SourceConfig};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use url::Url;

/// Plain GET of an announcement page or of the JSON API behind it.
pub struct HttpSource {
    client: Client,
    url: Url,
    format: PayloadFormat,
    timeout_secs: u64,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(user_agent) = config.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|err| ConfigError::Invalid {
            key: "source",
            reason: err.to_string(),
        })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            format: config.kind.format(),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        info!("Fetching announcements: '{}'", self.url.as_str());

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| {
                error!("Downloading failed: GET '{}' - '{}'", self.url.as_str(), err);
                if err.is_timeout() {
                    FetchError::Timeout(self.timeout_secs)
                } else {
                    FetchError::Http(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("GET '{}' returned {}", self.url.as_str(), status);
            return Err(FetchError::Status {
                url: self.url.to_string(),
                status,
            });
        }

        let text = response.text().await?;
        debug!("Received {} bytes from '{}'", text.len(), self.url.as_str());
        Ok(text)
    }

    fn format(&self) -> PayloadFormat {
        self.format
    }
}
