use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("libXml Error")]
    Xml,
    #[error("Script tag '{0}' with the page data not found")]
    MissingDataBlock(String),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No catalogs found at '{0}'")]
    MissingCatalogs(String),
    #[error("Catalog '{0}' not found")]
    MissingCategory(String),
    #[error("Catalog '{0}' contains no articles")]
    NoArticles(String),
}
