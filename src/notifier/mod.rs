mod error;
mod telegram;

pub use error::NotifyError;
pub use telegram::TelegramNotifier;

use crate::article::Article;
use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, article: &Article) -> Result<(), NotifyError>;
}
