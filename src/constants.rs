pub const DEFAULT_CATEGORY: &str = "Delisting";
pub const DEFAULT_SCRIPT_ID: &str = "__APP_DATA";
pub const DEFAULT_HTML_CATALOGS_POINTER: &str = "/appState/loader/dataByRouteId/d9b2/catalogs";
pub const DEFAULT_API_CATALOGS_POINTER: &str = "/data/catalogs";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RENDER_WAIT_SECS: u64 = 5;
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_PARSE_MODE: &str = "Markdown";

pub const DEFAULT_STATE_PATH: &str = "codes.json";
pub const DEFAULT_LOG_FILE: &str = "main.log";
pub const DEFAULT_LOG_MAX_SIZE_MB: u64 = 10;

// field names of the upstream catalog payload
pub const CATALOG_NAME: &str = "catalogName";
pub const CATALOG_ARTICLES: &str = "articles";
pub const ARTICLE_CODE: &str = "code";
pub const ARTICLE_TITLE: &str = "title";
pub const ARTICLE_RELEASE_DATE: &str = "releaseDate";

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHANNEL_ID: &str = "TELEGRAM_CHANNEL_ID";
pub const ENV_SENTRY_DSN: &str = "SENTRY_DSN";
