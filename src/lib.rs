mod article;
pub mod config;
mod constants;
pub mod diff;
mod error;
pub mod extractor;
pub mod notifier;
pub mod source;
pub mod state;
mod util;


pub use article::Article;
pub use config::{Config, PersistMode};
pub use error::WatcherError;

use extractor::ArticleExtractor;
use log::{debug, info};
use notifier::{Notifier, TelegramNotifier};
use source::Source;
use state::KnownCodes;
use std::path::PathBuf;

/// Outcome of one pass over the announcement source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: usize,
    pub new: usize,
    pub sent: usize,
    pub initial: bool,
}

pub struct DelistingWatcher {
    source: Box<dyn Source>,
    extractor: ArticleExtractor,
    notifier: Box<dyn Notifier>,
    state_path: PathBuf,
    persist: PersistMode,
}

impl DelistingWatcher {
    pub fn new(config: &Config) -> Result<Self, WatcherError> {
        let source = source::from_config(&config.source)?;
        let notifier = TelegramNotifier::new(&config.telegram)?;
        Ok(Self::with_parts(config, source, Box::new(notifier)))
    }

    pub fn with_parts(
        config: &Config,
        source: Box<dyn Source>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let extractor = ArticleExtractor::new(&config.source, source.format());
        Self {
            source,
            extractor,
            notifier,
            state_path: config.state.path.clone(),
            persist: config.persist_mode(),
        }
    }

    /// Fetch, announce every article not seen before and remember it.
    ///
    /// On the first run (no known codes yet) nothing is announced: the fetched
    /// codes only become the baseline for the following runs.
    pub async fn run(&self) -> Result<RunReport, WatcherError> {
        let mut known = KnownCodes::load(&self.state_path)?;
        let articles = self.fetch_articles().await?;

        let mut report = RunReport {
            fetched: articles.len(),
            ..RunReport::default()
        };

        if known.is_empty() {
            info!("Initial run of the script, saving codes");
            known.extend(articles.iter().map(|article| article.code.as_str()));
            known.save(&self.state_path)?;
            report.initial = true;
            return Ok(report);
        }

        let new_articles = diff::unseen(&articles, &known);
        report.new = new_articles.len();
        if new_articles.is_empty() {
            info!("No new articles");
            return Ok(report);
        }

        info!("New articles found: {}", new_articles.len());
        for article in &new_articles {
            if let Some(date) = article.release_date {
                debug!("'{}' released {}", article.code, date);
            }

            self.notifier.notify(article).await?;
            report.sent += 1;

            known.insert(&article.code);
            if self.persist == PersistMode::PerItem {
                known.save(&self.state_path)?;
            }
        }

        if self.persist == PersistMode::End {
            known.save(&self.state_path)?;
        }

        Ok(report)
    }

    /// Same lookup as [`run`](Self::run) without sending or writing anything.
    pub async fn check(&self) -> Result<Vec<Article>, WatcherError> {
        let known = KnownCodes::load(&self.state_path)?;
        let articles = self.fetch_articles().await?;
        if known.is_empty() {
            info!("No known codes yet, every article counts as new");
        }

        Ok(diff::unseen(&articles, &known)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>, WatcherError> {
        let raw = self.source.fetch().await?;
        Ok(self.extractor.extract(&raw)?)
    }
}
