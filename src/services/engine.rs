// src/services/engine.rs

//! Shared fetch machinery: cache lookup, quota reservation, pacing, the
//! upstream call, normalization, cache write, and stale-cache degradation.

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::error::{GatewayError, Result};
use crate::models::{Article, NewsPage};
use crate::quota::{Pacer, RateLimiter};
use crate::upstream::{NewsSource, SearchRequest, normalize};

/// Placeholder keyword for articles resolved outside a category context.
const GENERIC_KEYWORD: &str = "news";

/// What the gateway stores under one cache key.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Page(NewsPage),
    Article(Article),
}

/// Shared state bundle behind every fetch path: one cache, one quota
/// window, one pacer, one upstream source.
pub struct FeedEngine {
    cache: Arc<CacheStore<CachedValue>>,
    limiter: Arc<RateLimiter>,
    pacer: Arc<Pacer>,
    source: Arc<dyn NewsSource>,
}

impl FeedEngine {
    pub fn new(
        cache: Arc<CacheStore<CachedValue>>,
        limiter: Arc<RateLimiter>,
        pacer: Arc<Pacer>,
        source: Arc<dyn NewsSource>,
    ) -> Self {
        Self {
            cache,
            limiter,
            pacer,
            source,
        }
    }

    /// Run one page-shaped fetch through the full pipeline.
    ///
    /// Quota is consumed at reservation time, before the upstream call
    /// resolves: the provider bills the call regardless of its outcome, so
    /// an upstream failure after a granted reservation still counts.
    pub async fn fetch_page(
        &self,
        key: &str,
        request: SearchRequest,
        placeholder_keyword: &str,
    ) -> Result<NewsPage> {
        if let Some(CachedValue::Page(page)) = self.cache.get(key) {
            log::debug!("cache hit for page {key}");
            return Ok(page);
        }

        self.pacer.acquire().await;

        let reservation = self.limiter.reserve();
        if !reservation.granted {
            if let Some(CachedValue::Page(page)) = self.cache.get_raw(key) {
                log::warn!("quota exhausted; serving stale page for {key}");
                return Ok(page);
            }
            return Err(GatewayError::QuotaExhausted {
                daily_count: reservation.daily_count,
            });
        }

        let results = self.source.search(&request).await?;
        let page = normalize::news_page(
            results,
            request.page,
            request.page_size,
            placeholder_keyword,
            false,
        );
        self.cache.set(key, CachedValue::Page(page.clone()));
        Ok(page)
    }

    /// Run the single-article variant of the pipeline. The upstream request
    /// must carry an exact-match id filter; zero matches is `NotFound`.
    pub async fn fetch_article(
        &self,
        key: &str,
        request: SearchRequest,
        article_id: &str,
    ) -> Result<Article> {
        if let Some(CachedValue::Article(article)) = self.cache.get(key) {
            log::debug!("cache hit for article {article_id}");
            return Ok(article);
        }

        self.pacer.acquire().await;

        let reservation = self.limiter.reserve();
        if !reservation.granted {
            if let Some(CachedValue::Article(article)) = self.cache.get_raw(key) {
                log::warn!("quota exhausted; serving stale article {article_id}");
                return Ok(article);
            }
            return Err(GatewayError::QuotaExhausted {
                daily_count: reservation.daily_count,
            });
        }

        let results = self.source.search(&request).await?;
        let item = results
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound(article_id.to_string()))?;

        let article = normalize::article(item, GENERIC_KEYWORD, true);
        self.cache.set(key, CachedValue::Article(article.clone()));
        Ok(article)
    }
}
