// src/services/search.rs

//! Free-text search feeds.

use std::sync::Arc;

use crate::cache::key::{self, Operation};
use crate::error::{GatewayError, Result};
use crate::models::{FeedOptions, NewsPage, SortOrder};
use crate::upstream::SearchRequest;

use super::engine::FeedEngine;

/// Shortest accepted query, after trimming.
const MIN_QUERY_CHARS: usize = 2;

/// Placeholder keyword for search results without a thumbnail.
const SEARCH_KEYWORD: &str = "news";

/// Same machinery as the category path, keyed by a free-text query.
pub struct SearchFeed {
    engine: Arc<FeedEngine>,
}

impl SearchFeed {
    pub fn new(engine: Arc<FeedEngine>) -> Self {
        Self { engine }
    }

    /// Search the provider. The default ordering is relevance.
    pub async fn search(&self, query: &str, options: &FeedOptions) -> Result<NewsPage> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(GatewayError::validation(format!(
                "search query must be at least {MIN_QUERY_CHARS} characters"
            )));
        }
        options.validate()?;

        let sort = options.sort_or(SortOrder::Relevance);
        // Case differences never produce distinct cache entries.
        let normalized = trimmed.to_lowercase();
        let cache_key = key::page_key(
            Operation::Search,
            &normalized,
            options.page,
            options.page_size,
            options.date_range.as_ref(),
            sort,
        );

        let request = SearchRequest {
            query: Some(trimmed.to_string()),
            section: None,
            ids: None,
            page: options.page,
            page_size: options.page_size,
            order_by: sort,
            from_date: options.date_range.as_ref().and_then(|range| range.from),
            to_date: options.date_range.as_ref().and_then(|range| range.to),
        };

        self.engine
            .fetch_page(&cache_key, request, SEARCH_KEYWORD)
            .await
    }
}
