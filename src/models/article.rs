//! Article and feed page data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized article, independent of the provider's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Provider-assigned identifier (a path-like opaque string)
    pub id: String,

    /// Display title (never empty; falls back to a literal placeholder)
    pub title: String,

    /// Short teaser text (may be empty)
    pub description: String,

    /// Full body text, present only when the full body was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Canonical article URL
    pub url: String,

    /// Thumbnail or deterministic placeholder (never empty)
    pub image_url: String,

    /// Publication timestamp
    pub published_at: DateTime<Utc>,

    /// Human-readable source/section name
    pub source_name: String,
}

/// One page of a feed: articles plus pagination bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsPage {
    pub articles: Vec<Article>,

    /// Provider-reported total across all pages. For aggregated feeds this
    /// is a best-effort upper bound, not an exact count.
    pub total_results: usize,

    pub page: u32,
    pub page_size: u32,
}
