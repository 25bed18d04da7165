// src/services/preferences.rs

//! Preference aggregation: several categories merged into one feed.

use crate::error::{GatewayError, Result};
use crate::models::{Article, Category, FeedOptions, MAX_PAGE_SIZE, NewsPage, SortOrder};

use super::categories::CategoryFeed;

/// Merges a user's preferred categories into one sorted, re-paginated feed.
pub struct PreferenceFeed {
    categories: CategoryFeed,
    prefetch_factor: u32,
}

impl PreferenceFeed {
    pub fn new(categories: CategoryFeed, prefetch_factor: u32) -> Self {
        Self {
            categories,
            prefetch_factor: prefetch_factor.max(1),
        }
    }

    /// Fetch and merge the given categories into one page.
    ///
    /// Per-category fetches run strictly one after another; the shared pacer
    /// spaces successive upstream calls, since concurrent fetches would
    /// overshoot the per-second quota they all share. Any per-category
    /// failure fails the whole aggregation.
    pub async fn fetch(&self, categories: &[Category], options: &FeedOptions) -> Result<NewsPage> {
        let unique = dedupe(categories);
        if unique.is_empty() {
            return Err(GatewayError::validation("at least one category is required"));
        }
        options.validate()?;

        let sort = options.sort_or(SortOrder::Newest);
        let per_category = per_category_size(
            options.page_size,
            self.prefetch_factor,
            unique.len() as u32,
        );

        let mut merged: Vec<Article> = Vec::new();
        let mut reported_total = 0usize;
        for category in &unique {
            let category_options = FeedOptions {
                page: 1,
                page_size: per_category,
                date_range: options.date_range.clone(),
                sort: Some(sort),
            };
            let fetched = self.categories.fetch(*category, &category_options).await?;
            reported_total += fetched.total_results;
            merged.extend(fetched.articles);
        }

        sort_merged(&mut merged, sort);

        let start = (options.page as usize - 1) * options.page_size as usize;
        let end = (start + options.page_size as usize).min(merged.len());
        let window = if start < merged.len() {
            merged[start..end].to_vec()
        } else {
            Vec::new()
        };

        // Best-effort upper bound: per-category totals overlap the merged
        // list, so this can misstate true availability.
        let total_results = merged.len().max(reported_total);

        Ok(NewsPage {
            articles: window,
            total_results,
            page: options.page,
            page_size: options.page_size,
        })
    }
}

/// `ceil(page_size * factor / n)`, clamped to the upstream page-size
/// ceiling so over-fetching can never fail the per-category validation.
fn per_category_size(page_size: u32, factor: u32, categories: u32) -> u32 {
    (page_size * factor).div_ceil(categories).clamp(1, MAX_PAGE_SIZE)
}

/// First-seen order, duplicates removed.
fn dedupe(categories: &[Category]) -> Vec<Category> {
    let mut unique = Vec::new();
    for &category in categories {
        if !unique.contains(&category) {
            unique.push(category);
        }
    }
    unique
}

fn sort_merged(articles: &mut [Article], sort: SortOrder) {
    match sort {
        SortOrder::Newest => articles.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortOrder::Oldest => articles.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        // Relevance keeps per-category fetch order.
        SortOrder::Relevance => {}
    }
}
