use super::{FetchError, PayloadFormat, Source};
use crate::config::SourceConfig;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use log::{debug, error, info, warn};
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Loads the page in a headless browser behind a WebDriver server, so the
/// data block written by client-side scripts is present in the source.
pub struct BrowserSource {
    webdriver_url: String,
    url: Url,
    render_wait: Duration,
    timeout_secs: u64,
}

impl BrowserSource {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            url: config.url.clone(),
            render_wait: Duration::from_secs(config.render_wait_secs),
            timeout_secs: config.timeout_secs,
        }
    }

    async fn connect(&self) -> Result<Client, FetchError> {
        let mut capabilities = serde_json::Map::new();
        capabilities.insert(
            "goog:chromeOptions".into(),
            json!({ "args": ["--headless", "--disable-gpu", "--no-sandbox"] }),
        );
        capabilities.insert("moz:firefoxOptions".into(), json!({ "args": ["-headless"] }));

        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities);
        let client = builder
            .connect(&self.webdriver_url)
            .await
            .map_err(|err| {
                error!("WebDriver at '{}' refused session: {}", self.webdriver_url, err);
                err
            })?;
        Ok(client)
    }

    /// Ends the session through the client, or with a plain `DELETE` when the
    /// client is still stuck on a command that ran out of time.
    async fn end_session(&self, client: Client, session_id: Option<String>, timed_out: bool) {
        if !timed_out {
            let limit = Duration::from_secs(self.timeout_secs);
            match tokio::time::timeout(limit, client.close()).await {
                Ok(Ok(())) => return,
                Ok(Err(err)) => warn!("Closing WebDriver session failed: {}", err),
                Err(_) => warn!("Closing WebDriver session timed out"),
            }
        }

        let Some(session_id) = session_id else {
            warn!("WebDriver session left open: no session id");
            return;
        };
        let url = format!(
            "{}/session/{}",
            self.webdriver_url.trim_end_matches('/'),
            session_id
        );
        let res = reqwest::Client::new()
            .delete(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .send()
            .await;
        match res {
            Ok(response) => debug!(
                "Deleted WebDriver session '{}': {}",
                session_id,
                response.status()
            ),
            Err(err) => warn!("Deleting WebDriver session '{}' failed: {}", session_id, err),
        }
    }

    async fn render(&self, client: &Client) -> Result<String, FetchError> {
        client.goto(self.url.as_str()).await?;
        debug!("Waiting {:?} for scripts to finish", self.render_wait);
        tokio::time::sleep(self.render_wait).await;
        Ok(client.source().await?)
    }
}

#[async_trait]
impl Source for BrowserSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        info!("Rendering announcements: '{}'", self.url.as_str());

        // the render wait counts against the timeout as well
        let budget = Duration::from_secs(self.timeout_secs) + self.render_wait;
        let client = tokio::time::timeout(budget, self.connect())
            .await
            .map_err(|_| FetchError::Timeout(budget.as_secs()))??;
        let session_id = client.session_id().await.ok().flatten();

        let rendered = tokio::time::timeout(budget, self.render(&client)).await;
        let timed_out = rendered.is_err();
        self.end_session(client, session_id, timed_out).await;

        let html = rendered.map_err(|_| {
            error!("Rendering '{}' timed out", self.url.as_str());
            FetchError::Timeout(budget.as_secs())
        })??;

        debug!("Rendered page has {} bytes", html.len());
        Ok(html)
    }

    fn format(&self) -> PayloadFormat {
        PayloadFormat::Html
    }
}

#[cfg(test)]
mod tests {
    use super::BrowserSource;
    use crate::config::{SourceConfig, SourceKind};
    use crate::source::{FetchError, Source};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    // Request head and body, or `None` once the peer hung up.
    async fn read_request(stream: &mut TcpStream) -> Option<String> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|len| len.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                return Some(String::from_utf8_lossy(&buf).into_owned());
            }
        }
    }

    // WebDriver that opens session `s1`, never finishes any other command
    // and acknowledges `DELETE /session/s1`.
    async fn stalling_webdriver() -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        tokio::spawn(async move {
            loop {
                let (mut stream, _) = listener.accept().await.unwrap();
                let log = log.clone();
                tokio::spawn(async move {
                    while let Some(request) = read_request(&mut stream).await {
                        let line = request.lines().next().unwrap_or_default();
                        let line = line.trim_end_matches(" HTTP/1.1").to_owned();
                        log.lock().unwrap().push(line.clone());

                        let body = match line.as_str() {
                            "POST /session" => r#"{"value":{"sessionId":"s1","capabilities":{}}}"#,
                            "DELETE /session/s1" => r#"{"value":null}"#,
                            _ => std::future::pending().await,
                        };
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\n\r\n{body}",
                            body.len()
                        );
                        if stream.write_all(response.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        (format!("http://{addr}"), seen)
    }

    #[tokio::test]
    async fn timed_out_render_ends_session() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (webdriver_url, seen) = stalling_webdriver().await;

        let config = SourceConfig {
            kind: SourceKind::Browser,
            url: url::Url::parse("https://www.binance.com/en/support/announcement/delisting")
                .unwrap(),
            link_base: "https://x/".into(),
            category: "Delisting".into(),
            catalogs_pointer: None,
            script_id: "__APP_DATA".into(),
            user_agent: None,
            timeout_secs: 1,
            webdriver_url,
            render_wait_secs: 0,
        };

        let res = BrowserSource::new(&config).fetch().await;

        assert!(matches!(res, Err(FetchError::Timeout(1))));
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.first().map(String::as_str), Some("POST /session"));
        assert!(seen.iter().any(|line| line == "DELETE /session/s1"));
    }
}
