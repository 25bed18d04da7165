//! Upstream provider access.
//!
//! [`NewsSource`] is the seam between the gateway and the provider's search
//! endpoint; [`UpstreamClient`] is the real HTTP implementation and tests
//! substitute stubs.

pub mod client;
pub mod normalize;
pub mod wire;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use client::UpstreamClient;

use crate::error::Result;
use crate::models::SortOrder;
use wire::SearchResults;

/// Fields requested from the provider on every call. Body text is always
/// fetched because the description fallback chain needs it.
pub const SHOW_FIELDS: &str = "headline,trailText,bodyText,thumbnail";

/// One upstream search call, fully specified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query (`q`)
    pub query: Option<String>,

    /// Section filter (`section`)
    pub section: Option<String>,

    /// Exact-match article id filter (`ids`)
    pub ids: Option<String>,

    pub page: u32,
    pub page_size: u32,
    pub order_by: SortOrder,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl SearchRequest {
    /// Query pairs for the provider, excluding the credential.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page-size", self.page_size.to_string()),
            ("show-fields", SHOW_FIELDS.to_string()),
            ("order-by", self.order_by.as_query_value().to_string()),
        ];
        if let Some(query) = &self.query {
            pairs.push(("q", query.clone()));
        }
        if let Some(section) = &self.section {
            pairs.push(("section", section.clone()));
        }
        if let Some(ids) = &self.ids {
            pairs.push(("ids", ids.clone()));
        }
        if let Some(from) = self.from_date {
            pairs.push(("from-date", from.to_string()));
        }
        if let Some(to) = self.to_date {
            pairs.push(("to-date", to.to_string()));
        }
        pairs
    }
}

/// Trait for the provider's search endpoint.
///
/// Implementations execute exactly one call per invocation and never retry;
/// retry policy belongs to the caller.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults>;
}
