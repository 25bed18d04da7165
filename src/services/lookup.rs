// src/services/lookup.rs

//! Single-article resolution by provider id or full URL.

use std::sync::Arc;

use url::Url;

use crate::cache::key;
use crate::error::{GatewayError, Result};
use crate::models::{Article, SortOrder};
use crate::upstream::SearchRequest;

use super::engine::FeedEngine;

/// Resolves one article through an exact-match upstream query, bypassing
/// pagination and aggregation.
pub struct ArticleLookup {
    engine: Arc<FeedEngine>,
}

impl ArticleLookup {
    pub fn new(engine: Arc<FeedEngine>) -> Self {
        Self { engine }
    }

    /// Resolve an article by opaque provider id or full article URL.
    pub async fn by_id_or_url(&self, id_or_url: &str) -> Result<Article> {
        let article_id = extract_article_id(id_or_url)?;
        let cache_key = key::article_key(&article_id);

        let request = SearchRequest {
            query: None,
            section: None,
            ids: Some(article_id.clone()),
            page: 1,
            page_size: 1,
            order_by: SortOrder::Relevance,
            from_date: None,
            to_date: None,
        };

        self.engine
            .fetch_article(&cache_key, request, &article_id)
            .await
    }
}

/// Strip the provider domain from a full article URL; opaque ids pass
/// through unchanged.
fn extract_article_id(id_or_url: &str) -> Result<String> {
    let trimmed = id_or_url.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::validation("article id must not be empty"));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let parsed = Url::parse(trimmed)
            .map_err(|e| GatewayError::validation(format!("malformed article URL: {e}")))?;
        let id = parsed.path().trim_matches('/').to_string();
        if id.is_empty() {
            return Err(GatewayError::validation(
                "article URL has no path to derive an id from",
            ));
        }
        return Ok(id);
    }

    Ok(trimmed.trim_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{StubSource, fast_engine, item};

    use super::*;

    #[test]
    fn url_input_is_stripped_to_the_path_id() {
        let id = extract_article_id("https://news.example/technology/2026/feb/01/sample").unwrap();
        assert_eq!(id, "technology/2026/feb/01/sample");
    }

    #[test]
    fn opaque_id_passes_through() {
        let id = extract_article_id("technology/2026/feb/01/sample").unwrap();
        assert_eq!(id, "technology/2026/feb/01/sample");
    }

    #[test]
    fn domain_only_url_is_a_format_error() {
        let error = extract_article_id("https://news.example/").unwrap_err();
        assert_eq!(error.kind(), "validation_failed");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(extract_article_id("  ").is_err());
    }

    #[tokio::test]
    async fn lookup_round_trips_through_the_engine() {
        let article_id = "technology/2026/feb/01/sample";
        let source = Arc::new(
            StubSource::new().with(article_id, vec![item(article_id, "2026-02-01T10:00:00Z")]),
        );
        let lookup = ArticleLookup::new(Arc::new(fast_engine(source.clone())));

        let article = lookup
            .by_id_or_url("https://news.example/technology/2026/feb/01/sample")
            .await
            .unwrap();

        assert_eq!(article.id, article_id);
        let calls = source.calls.lock().unwrap();
        assert_eq!(calls[0].ids.as_deref(), Some(article_id));
        assert_eq!(calls[0].page_size, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let source = Arc::new(StubSource::new());
        let lookup = ArticleLookup::new(Arc::new(fast_engine(source)));

        let error = lookup.by_id_or_url("technology/missing").await.unwrap_err();
        assert_eq!(error.kind(), "not_found");
        assert_eq!(error.status_hint(), 404);
    }
}
