mod error;


pub use error::ConfigError;

use crate::constants;
use crate::source::PayloadFormat;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub state: StateConfig,
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub sentry: SentryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Api,
    Browser,
}

impl SourceKind {
    pub fn format(self) -> PayloadFormat {
        match self {
            SourceKind::Html | SourceKind::Browser => PayloadFormat::Html,
            SourceKind::Api => PayloadFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistMode {
    /// Write the state file once, after every new article was sent.
    End,
    /// Write the state file after each sent article.
    PerItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub url: Url,
    pub link_base: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub catalogs_pointer: Option<String>,
    #[serde(default = "default_script_id")]
    pub script_id: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default = "default_render_wait_secs")]
    pub render_wait_secs: u64,
}

impl SourceConfig {
    pub fn catalogs_pointer(&self) -> &str {
        match self.catalogs_pointer.as_deref() {
            Some(pointer) => pointer,
            None => match self.kind.format() {
                PayloadFormat::Html => constants::DEFAULT_HTML_CATALOGS_POINTER,
                PayloadFormat::Json => constants::DEFAULT_API_CATALOGS_POINTER,
            },
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub persist: Option<PersistMode>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
            persist: None,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    #[serde(default)]
    pub disable_web_page_preview: bool,
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// keep the bot token out of debug logs
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("parse_mode", &self.parse_mode)
            .field("disable_web_page_preview", &self.disable_web_page_preview)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    #[serde(default = "default_log_max_size_mb")]
    pub max_size_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            max_size_mb: default_log_max_size_mb(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentryConfig {
    #[serde(default)]
    pub dsn: Option<String>,
}

impl Config {
    /// Read, override from the environment and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::IO {
            path: path.to_owned(),
            source,
        })?;

        let mut config = Self::parse(&data)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(constants::ENV_BOT_TOKEN) {
            self.telegram.bot_token = token;
        }
        if let Ok(channel_id) = std::env::var(constants::ENV_CHANNEL_ID) {
            self.telegram.channel_id = channel_id;
        }
        if let Ok(dsn) = std::env::var(constants::ENV_SENTRY_DSN) {
            self.sentry.dsn = Some(dsn);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.source.url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "source.url",
                reason: format!("unsupported scheme '{}'", self.source.url.scheme()),
            });
        }
        if self.source.link_base.trim().is_empty() {
            return Err(ConfigError::Missing("source.link_base"));
        }
        if self.source.category.trim().is_empty() {
            return Err(ConfigError::Missing("source.category"));
        }

        let pointer = self.source.catalogs_pointer();
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "source.catalogs_pointer",
                reason: "a JSON pointer must be empty or start with '/'".into(),
            });
        }

        if self.source.kind == SourceKind::Browser && !cfg!(feature = "browser") {
            return Err(ConfigError::BrowserUnsupported);
        }

        if self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::Missing("telegram.bot_token"));
        }
        if self.telegram.channel_id.trim().is_empty() {
            return Err(ConfigError::Missing("telegram.channel_id"));
        }

        Ok(())
    }

    /// The API source keeps its progress per sent article unless told otherwise.
    pub fn persist_mode(&self) -> PersistMode {
        match (self.state.persist, self.source.kind) {
            (Some(mode), _) => mode,
            (None, SourceKind::Api) => PersistMode::PerItem,
            (None, _) => PersistMode::End,
        }
    }

    pub fn sentry_dsn(&self) -> Option<&str> {
        self.sentry
            .dsn
            .as_deref()
            .map(str::trim)
            .filter(|dsn| !dsn.is_empty())
    }
}

fn default_category() -> String {
    constants::DEFAULT_CATEGORY.into()
}

fn default_script_id() -> String {
    constants::DEFAULT_SCRIPT_ID.into()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_webdriver_url() -> String {
    constants::DEFAULT_WEBDRIVER_URL.into()
}

fn default_render_wait_secs() -> u64 {
    constants::DEFAULT_RENDER_WAIT_SECS
}

fn default_state_path() -> PathBuf {
    PathBuf::from(constants::DEFAULT_STATE_PATH)
}

fn default_parse_mode() -> String {
    constants::DEFAULT_PARSE_MODE.into()
}

fn default_telegram_api_url() -> String {
    constants::DEFAULT_TELEGRAM_API_URL.into()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(constants::DEFAULT_LOG_FILE)
}

fn default_log_max_size_mb() -> u64 {
    constants::DEFAULT_LOG_MAX_SIZE_MB
}
