// src/cache/key.rs

//! Deterministic cache key derivation.
//!
//! Identical request parameters must always map to the identical key; the
//! canonical request string is hashed so keys stay fixed-width regardless of
//! query length.

use sha2::{Digest, Sha256};

use crate::models::{DateRange, SortOrder};

/// Which gateway operation a key belongs to. Keys never collide across
/// operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Category,
    Search,
    Article,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Search => "search",
            Self::Article => "article",
        }
    }
}

/// Key for a page-shaped fetch (category feed or free-text search).
pub fn page_key(
    operation: Operation,
    subject: &str,
    page: u32,
    page_size: u32,
    date_range: Option<&DateRange>,
    sort: SortOrder,
) -> String {
    let from = date_range
        .and_then(|range| range.from)
        .map(|date| date.to_string())
        .unwrap_or_default();
    let to = date_range
        .and_then(|range| range.to)
        .map(|date| date.to_string())
        .unwrap_or_default();

    digest(&format!(
        "{}:{subject}:p{page}:s{page_size}:f{from}:t{to}:o{}",
        operation.as_str(),
        sort.as_query_value()
    ))
}

/// Key for a single-article lookup.
pub fn article_key(article_id: &str) -> String {
    digest(&format!("{}:{article_id}", Operation::Article.as_str()))
}

fn digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
