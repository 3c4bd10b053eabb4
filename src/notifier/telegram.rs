use super::{Notifier, NotifyError};
use crate::article::Article;
use crate::config::{ConfigError, TelegramConfig};
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MARKDOWN_SPECIAL: &[char] = &['_', '*', '`', '['];
const MARKDOWN_V2_SPECIAL: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
    disable_web_page_preview: bool,
}

#[derive(Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Posts one `sendMessage` call per article to a Telegram chat or channel.
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
    parse_mode: Option<String>,
    disable_web_page_preview: bool,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ConfigError::Invalid {
                key: "telegram",
                reason: err.to_string(),
            })?;

        let parse_mode = Some(config.parse_mode.trim())
            .filter(|mode| !mode.is_empty())
            .map(str::to_owned);

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_url.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.channel_id.clone(),
            parse_mode,
            disable_web_page_preview: config.disable_web_page_preview,
        })
    }

    /// Escapes `text` so Telegram shows it literally under the configured parse mode.
    pub fn escape(&self, text: &str) -> String {
        let mode = self.parse_mode.as_deref().map(str::to_ascii_lowercase);
        match mode.as_deref() {
            Some("markdown") => Self::escape_chars(text, MARKDOWN_SPECIAL),
            Some("markdownv2") => Self::escape_chars(text, MARKDOWN_V2_SPECIAL),
            Some("html") => text
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
            _ => text.to_owned(),
        }
    }

    fn escape_chars(text: &str, special: &[char]) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if special.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    pub async fn send_text(&self, text: &str) -> Result<(), NotifyError> {
        let params = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: self.parse_mode.as_deref(),
            disable_web_page_preview: self.disable_web_page_preview,
        };

        // the endpoint carries the bot token, keep it out of errors and logs
        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;
        let answer = serde_json::from_str::<BotApiResponse>(&body).ok();

        match answer {
            Some(answer) if status.is_success() && answer.ok => Ok(()),
            answer => {
                let description = answer
                    .and_then(|answer| answer.description)
                    .unwrap_or(body);
                error!("Telegram rejected message ({}): {}", status, description);
                Err(NotifyError::Rejected {
                    status,
                    description,
                })
            }
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, article: &Article) -> Result<(), NotifyError> {
        self.send_text(&self.escape(&article.message())).await?;
        info!("New link sent to telegram: {}", article.link);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TelegramNotifier;
    use crate::config::TelegramConfig;

    fn notifier(parse_mode: &str) -> TelegramNotifier {
        let config = TelegramConfig {
            bot_token: "123:abc".into(),
            channel_id: "@delistings".into(),
            parse_mode: parse_mode.into(),
            disable_web_page_preview: false,
            api_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        };
        TelegramNotifier::new(&config).unwrap()
    }

    #[test]
    fn escape_markdown() {
        let text = "Binance Will Delist FOO_USDT and *BAR [`x`]";
        assert_eq!(
            notifier("Markdown").escape(text),
            "Binance Will Delist FOO\\_USDT and \\*BAR \\[\\`x\\`]"
        );
    }

    #[test]
    fn escape_markdown_v2() {
        assert_eq!(
            notifier("MarkdownV2").escape("FOO_USDT (v1.2)!\nhttps://x/A-3"),
            "FOO\\_USDT \\(v1\\.2\\)\\!\nhttps://x/A\\-3"
        );
    }

    #[test]
    fn escape_html_and_plain() {
        assert_eq!(notifier("HTML").escape("A<B> & C"), "A&lt;B&gt; &amp; C");
        assert_eq!(notifier("").escape("FOO_USDT *x*"), "FOO_USDT *x*");
    }
}
