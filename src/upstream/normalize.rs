// src/upstream/normalize.rs

//! Conversion of provider records into the internal article shape.
//!
//! Pure functions: no I/O, no clock reads beyond parsing the record's own
//! publication date.

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Article, NewsPage};

use super::wire::{ContentItem, SearchResults};

/// Longest description taken from body text when no trail text exists.
const DESCRIPTION_GRAPHEMES: usize = 200;

/// Title shown when the provider supplies none.
const FALLBACK_TITLE: &str = "No title";

/// Convert a full search payload into a feed page.
///
/// `total_results` comes from the provider's reported total, or the result
/// count when the provider omits it.
pub fn news_page(
    results: SearchResults,
    page: u32,
    page_size: u32,
    placeholder_keyword: &str,
    include_body: bool,
) -> NewsPage {
    let total_results = results
        .total
        .map(|total| total as usize)
        .unwrap_or(results.results.len());

    let articles = results
        .results
        .into_iter()
        .map(|item| article(item, placeholder_keyword, include_body))
        .collect();

    NewsPage {
        articles,
        total_results,
        page,
        page_size,
    }
}

/// Convert one provider record.
pub fn article(item: ContentItem, placeholder_keyword: &str, include_body: bool) -> Article {
    let fields = item.fields.unwrap_or_default();

    let title = fields
        .headline
        .filter(|headline| !headline.trim().is_empty())
        .or_else(|| Some(item.web_title).filter(|t| !t.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let description = fields
        .trail_text
        .as_deref()
        .filter(|trail| !trail.trim().is_empty())
        .map(str::to_string)
        .or_else(|| {
            fields
                .body_text
                .as_deref()
                .map(|body| truncate_graphemes(body, DESCRIPTION_GRAPHEMES))
        })
        .unwrap_or_default();

    let image_url = fields
        .thumbnail
        .filter(|thumbnail| !thumbnail.trim().is_empty())
        .unwrap_or_else(|| placeholder_image(placeholder_keyword));

    let content = if include_body { fields.body_text } else { None };

    Article {
        id: item.id,
        title,
        description,
        content,
        url: item.web_url,
        image_url,
        published_at: parse_publication_date(item.web_publication_date.as_deref()),
        source_name: item
            .section_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "News".to_string()),
    }
}

/// Deterministic placeholder used when the provider has no thumbnail.
fn placeholder_image(keyword: &str) -> String {
    format!("https://placehold.co/600x400?text={keyword}")
}

fn truncate_graphemes(text: &str, limit: usize) -> String {
    text.graphemes(true).take(limit).collect()
}

fn parse_publication_date(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
