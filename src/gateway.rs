// src/gateway.rs

//! The gateway service instance.
//!
//! One `NewsGateway` owns one cache, one quota window, one pacer, and one
//! upstream client, shared by every caller in the process. Construction is
//! explicit (no module-level singletons) so tests can run isolated
//! instances side by side.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::cache::CacheStore;
use crate::error::Result;
use crate::models::{Article, Category, FeedOptions, GatewayConfig, NewsPage};
use crate::quota::{Pacer, QuotaStats, RateLimiter};
use crate::services::{
    ArticleLookup, CachedValue, CategoryFeed, FeedEngine, PreferenceFeed, SearchFeed,
};
use crate::upstream::{NewsSource, UpstreamClient};

/// Facade over the feed services, plus the cache-sweep lifecycle.
pub struct NewsGateway {
    cache: Arc<CacheStore<CachedValue>>,
    limiter: Arc<RateLimiter>,
    categories: CategoryFeed,
    preferences: PreferenceFeed,
    search: SearchFeed,
    lookup: ArticleLookup,
    sweep_interval: Duration,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl NewsGateway {
    /// Build a gateway backed by the real HTTP client.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let source = Arc::new(UpstreamClient::new(&config.provider)?);
        Ok(Self::with_source(config, source))
    }

    /// Build a gateway over any news source. Tests inject stubs here.
    pub fn with_source(config: &GatewayConfig, source: Arc<dyn NewsSource>) -> Self {
        let cache = Arc::new(CacheStore::new(config.cache.ttl()));
        let limiter = Arc::new(RateLimiter::new(config.quota.clone()));
        let pacer = Arc::new(Pacer::new(config.feed.pacing_interval()));
        let engine = Arc::new(FeedEngine::new(
            Arc::clone(&cache),
            Arc::clone(&limiter),
            pacer,
            source,
        ));

        Self {
            cache,
            limiter,
            categories: CategoryFeed::new(Arc::clone(&engine)),
            preferences: PreferenceFeed::new(
                CategoryFeed::new(Arc::clone(&engine)),
                config.feed.prefetch_factor,
            ),
            search: SearchFeed::new(Arc::clone(&engine)),
            lookup: ArticleLookup::new(engine),
            sweep_interval: config.cache.sweep_interval(),
            sweeper: Mutex::new(None),
        }
    }

    /// Fetch one category page.
    pub async fn fetch_by_category(
        &self,
        category: Category,
        options: &FeedOptions,
    ) -> Result<NewsPage> {
        self.categories.fetch(category, options).await
    }

    /// Merge the user's preferred categories into one feed page.
    pub async fn fetch_by_preferences(
        &self,
        categories: &[Category],
        options: &FeedOptions,
    ) -> Result<NewsPage> {
        self.preferences.fetch(categories, options).await
    }

    /// Free-text search.
    pub async fn search(&self, query: &str, options: &FeedOptions) -> Result<NewsPage> {
        self.search.search(query, options).await
    }

    /// Resolve a single article by provider id or full URL.
    pub async fn fetch_by_id(&self, id_or_url: &str) -> Result<Article> {
        self.lookup.by_id_or_url(id_or_url).await
    }

    /// Read-only quota snapshot; reserves nothing.
    pub fn rate_limit_stats(&self) -> QuotaStats {
        self.limiter.stats()
    }

    /// Drop every cache entry unconditionally.
    pub fn clear_cache(&self) {
        self.cache.clear();
        log::info!("cache cleared");
    }

    /// Spawn the periodic sweep task. Starting twice is a no-op.
    pub fn start_cache_cleanup(&self) {
        let mut sweeper = self.lock_sweeper();
        if sweeper.is_some() {
            return;
        }

        let cache = Arc::clone(&self.cache);
        let interval = self.sweep_interval;
        *sweeper = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; sweeps start one
            // interval in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cache.sweep();
                if removed > 0 {
                    log::debug!("cache sweep removed {removed} expired entries");
                }
            }
        }));
    }

    /// Abort the sweep task if one is running.
    pub fn stop_cache_cleanup(&self) {
        let mut sweeper = self.lock_sweeper();
        if let Some(handle) = sweeper.take() {
            handle.abort();
        }
    }

    fn lock_sweeper(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.sweeper.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for NewsGateway {
    fn drop(&mut self) {
        self.stop_cache_cleanup();
    }
}

#[cfg(test)]
mod tests {
    use crate::models::QuotaConfig;
    use crate::services::testing::{StubSource, item};

    use super::*;

    fn test_config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.quota = QuotaConfig::relaxed();
        config.feed.pacing_interval_ms = 100;
        config
    }

    fn stub() -> Arc<StubSource> {
        Arc::new(
            StubSource::new()
                .with("technology", vec![item("technology/a", "2026-02-01T10:00:00Z")]),
        )
    }

    #[tokio::test]
    async fn category_fetch_updates_quota_stats() {
        let gateway = NewsGateway::with_source(&test_config(), stub());
        assert_eq!(gateway.rate_limit_stats().daily_count, 0);

        gateway
            .fetch_by_category(Category::Technology, &FeedOptions::default())
            .await
            .unwrap();

        let stats = gateway.rate_limit_stats();
        assert_eq!(stats.daily_count, 1);
        assert_eq!(stats.remaining, stats.daily_cap - 1);
    }

    #[tokio::test]
    async fn clear_cache_forces_a_refetch() {
        let source = stub();
        let gateway = NewsGateway::with_source(&test_config(), source.clone());

        gateway
            .fetch_by_category(Category::Technology, &FeedOptions::default())
            .await
            .unwrap();
        gateway.clear_cache();
        gateway
            .fetch_by_category(Category::Technology, &FeedOptions::default())
            .await
            .unwrap();

        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn sweep_lifecycle_is_idempotent() {
        let gateway = NewsGateway::with_source(&test_config(), stub());

        gateway.start_cache_cleanup();
        gateway.start_cache_cleanup();
        gateway.stop_cache_cleanup();
        gateway.stop_cache_cleanup();
    }

    #[tokio::test]
    async fn two_gateways_track_quota_independently() {
        let a = NewsGateway::with_source(&test_config(), stub());
        let b = NewsGateway::with_source(&test_config(), stub());

        a.fetch_by_category(Category::Technology, &FeedOptions::default())
            .await
            .unwrap();

        assert_eq!(a.rate_limit_stats().daily_count, 1);
        assert_eq!(b.rate_limit_stats().daily_count, 0);
    }
}
