// src/services/categories.rs

//! Category feed fetching.

use std::sync::Arc;

use crate::cache::key::{self, Operation};
use crate::error::Result;
use crate::models::{Category, FeedOptions, NewsPage, SortOrder};
use crate::upstream::SearchRequest;

use super::engine::FeedEngine;

/// Fetches one provider section as a feed page.
pub struct CategoryFeed {
    engine: Arc<FeedEngine>,
}

impl CategoryFeed {
    pub fn new(engine: Arc<FeedEngine>) -> Self {
        Self { engine }
    }

    /// Fetch a single category page. Validation runs before any cache or
    /// quota interaction; the default ordering is newest-first.
    pub async fn fetch(&self, category: Category, options: &FeedOptions) -> Result<NewsPage> {
        options.validate()?;

        let sort = options.sort_or(SortOrder::Newest);
        let section = category.section_id();
        let cache_key = key::page_key(
            Operation::Category,
            section,
            options.page,
            options.page_size,
            options.date_range.as_ref(),
            sort,
        );

        let request = SearchRequest {
            query: None,
            section: Some(section.to_string()),
            ids: None,
            page: options.page,
            page_size: options.page_size,
            order_by: sort,
            from_date: options.date_range.as_ref().and_then(|range| range.from),
            to_date: options.date_range.as_ref().and_then(|range| range.to),
        };

        self.engine.fetch_page(&cache_key, request, section).await
    }
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{StubSource, fast_engine, item};

    use super::*;

    #[tokio::test]
    async fn invalid_options_never_reach_upstream() {
        let source = Arc::new(StubSource::new());
        let feed = CategoryFeed::new(Arc::new(fast_engine(source.clone())));

        let options = FeedOptions {
            page_size: 51,
            ..FeedOptions::default()
        };
        let error = feed.fetch(Category::Technology, &options).await.unwrap_err();

        assert_eq!(error.kind(), "validation_failed");
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn request_carries_the_section_id_and_default_sort() {
        let source = Arc::new(
            StubSource::new().with("sport", vec![item("sport/a", "2026-02-01T10:00:00Z")]),
        );
        let feed = CategoryFeed::new(Arc::new(fast_engine(source.clone())));

        let page = feed
            .fetch(Category::Sports, &FeedOptions::default())
            .await
            .unwrap();
        assert_eq!(page.articles.len(), 1);

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls[0].section.as_deref(), Some("sport"));
        assert_eq!(calls[0].order_by, SortOrder::Newest);
    }

    #[tokio::test]
    async fn different_pages_use_different_cache_keys() {
        let source = Arc::new(
            StubSource::new().with("technology", vec![item("tech/a", "2026-02-01T10:00:00Z")]),
        );
        let feed = CategoryFeed::new(Arc::new(fast_engine(source.clone())));

        feed.fetch(Category::Technology, &FeedOptions::default())
            .await
            .unwrap();
        feed.fetch(
            Category::Technology,
            &FeedOptions {
                page: 2,
                ..FeedOptions::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(source.call_count(), 2);
    }
}
