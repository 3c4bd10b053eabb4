mod error;


pub use error::ExtractError;

use crate::article::Article;
use crate::config::SourceConfig;
use crate::constants;
use crate::source::PayloadFormat;
use crate::util::Util;
use chrono::{TimeZone, Utc};
use log::{debug, error, info};
use serde_json::Value;

/// Turns the raw content of a source into the articles of one catalog.
///
/// HTML pages carry the catalogs inside a `<script type="application/json">`
/// block; the JSON API returns them directly. Either way the catalog list is
/// looked up with a JSON pointer and the catalog is picked by name.
pub struct ArticleExtractor {
    format: PayloadFormat,
    script_id: String,
    catalogs_pointer: String,
    category: String,
    link_base: String,
}

impl ArticleExtractor {
    pub fn new(config: &SourceConfig, format: PayloadFormat) -> Self {
        Self {
            format,
            script_id: config.script_id.clone(),
            catalogs_pointer: config.catalogs_pointer().to_owned(),
            category: config.category.clone(),
            link_base: config.link_base.clone(),
        }
    }

    pub fn extract(&self, raw: &str) -> Result<Vec<Article>, ExtractError> {
        let payload = match self.format {
            PayloadFormat::Html => self.find_data_block(raw)?,
            PayloadFormat::Json => raw.to_owned(),
        };

        let data: Value = serde_json::from_str(&payload).map_err(|err| {
            error!("JSON parsing error: {}", err);
            err
        })?;

        let entries = self.find_category(&data)?;

        let articles: Vec<Article> = entries
            .into_iter()
            .filter_map(|entry| self.parse_entry(entry))
            .collect();

        if articles.is_empty() {
            error!("Catalog '{}' yielded no articles", self.category);
            return Err(ExtractError::NoArticles(self.category.clone()));
        }

        info!(
            "Extracted {} articles from catalog '{}'",
            articles.len(),
            self.category
        );
        Ok(articles)
    }

    fn find_data_block(&self, html: &str) -> Result<String, ExtractError> {
        let document = Util::parse_html(html)?;
        let xpath_ctx = Util::get_xpath_ctx(&document)?;

        let xpath = format!(
            "//script[@id='{}' and @type='application/json']",
            self.script_id
        );
        Util::extract_value(&xpath_ctx, &xpath)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                error!("Script tag '{}' not found", self.script_id);
                ExtractError::MissingDataBlock(self.script_id.clone())
            })
    }

    /// Articles of every catalog named after the category, in page order.
    fn find_category<'a>(&self, data: &'a Value) -> Result<Vec<&'a Value>, ExtractError> {
        let catalogs = data
            .pointer(&self.catalogs_pointer)
            .and_then(Value::as_array)
            .filter(|catalogs| !catalogs.is_empty())
            .ok_or_else(|| {
                error!("Error getting catalogs: nothing at '{}'", self.catalogs_pointer);
                ExtractError::MissingCatalogs(self.catalogs_pointer.clone())
            })?;

        let matching: Vec<&Value> = catalogs
            .iter()
            .filter(|catalog| {
                catalog.get(constants::CATALOG_NAME).and_then(Value::as_str)
                    == Some(self.category.as_str())
            })
            .collect();

        if matching.is_empty() {
            error!("Error getting catalog '{}': not found", self.category);
            return Err(ExtractError::MissingCategory(self.category.clone()));
        }

        Ok(matching
            .into_iter()
            .filter_map(|catalog| catalog.get(constants::CATALOG_ARTICLES).and_then(Value::as_array))
            .flatten()
            .collect())
    }

    fn parse_entry(&self, entry: &Value) -> Option<Article> {
        let code = entry.get(constants::ARTICLE_CODE).and_then(Self::code_string);
        let title = entry
            .get(constants::ARTICLE_TITLE)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|title| !title.is_empty());

        let (Some(code), Some(title)) = (code, title) else {
            debug!("Skipping catalog entry without code or title: {}", entry);
            return None;
        };

        let mut article = Article::new(&code, &self.link_base, title);
        article.release_date = entry
            .get(constants::ARTICLE_RELEASE_DATE)
            .and_then(Value::as_i64)
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single());
        Some(article)
    }

    fn code_string(value: &Value) -> Option<String> {
        match value {
            Value::String(code) if !code.trim().is_empty() => Some(code.trim().to_owned()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }
}
