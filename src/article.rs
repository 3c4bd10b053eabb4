use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub code: String,
    pub link: String,
    pub title: String,
    pub release_date: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(code: &str, link_base: &str, title: &str) -> Self {
        Self {
            code: code.to_owned(),
            link: format!("{link_base}{code}"),
            title: title.to_owned(),
            release_date: None,
        }
    }

    /// Text of the chat message announcing this article: title, then link.
    pub fn message(&self) -> String {
        format!("{}\n{}", self.title, self.link)
    }
}
