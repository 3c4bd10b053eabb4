use crate::article::Article;
use crate::state::KnownCodes;
use std::collections::HashSet;

/// Articles whose code is not known yet, in fetch order. A code listed twice
/// in one fetch is only returned once.
pub fn unseen<'a>(articles: &'a [Article], known: &KnownCodes) -> Vec<&'a Article> {
    let mut taken = HashSet::new();
    articles
        .iter()
        .filter(|article| !known.contains(&article.code))
        .filter(|article| taken.insert(article.code.as_str()))
        .collect()
}
