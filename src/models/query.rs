//! Feed request types and their validation rules.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Upstream-imposed ceiling on page size.
pub const MAX_PAGE_SIZE: u32 = 50;

/// The closed set of feed categories.
///
/// Invalid category strings are rejected at the parse boundary, before any
/// cache or quota interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Entertainment => "entertainment",
            Self::General => "general",
            Self::Health => "health",
            Self::Science => "science",
            Self::Sports => "sports",
            Self::Technology => "technology",
        }
    }

    /// Section identifier the upstream provider uses for this category.
    pub fn section_id(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Entertainment => "culture",
            Self::General => "news",
            Self::Health => "society",
            Self::Science => "science",
            Self::Sports => "sport",
            Self::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "business" => Ok(Self::Business),
            "entertainment" => Ok(Self::Entertainment),
            "general" => Ok(Self::General),
            "health" => Ok(Self::Health),
            "science" => Ok(Self::Science),
            "sports" => Ok(Self::Sports),
            "technology" => Ok(Self::Technology),
            other => Err(GatewayError::validation(format!(
                "unknown category '{other}'"
            ))),
        }
    }
}

/// Result ordering for feed pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Newest,
    Oldest,
    Relevance,
}

impl SortOrder {
    /// Value the upstream `order-by` parameter expects.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Relevance => "relevance",
        }
    }
}

impl FromStr for SortOrder {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "relevance" => Ok(Self::Relevance),
            other => Err(GatewayError::validation(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}

/// Optional calendar-date bounds on a feed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(GatewayError::validation(format!(
                    "date range start {from} is after end {to}"
                )));
            }
        }
        Ok(())
    }
}

/// Options shared by every page-shaped fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOptions {
    pub page: u32,
    pub page_size: u32,
    pub date_range: Option<DateRange>,
    /// When `None`, each operation applies its own default ordering.
    pub sort: Option<SortOrder>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            date_range: None,
            sort: None,
        }
    }
}

impl FeedOptions {
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(GatewayError::validation("page must be >= 1"));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(GatewayError::validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if let Some(range) = &self.date_range {
            range.validate()?;
        }
        Ok(())
    }

    pub fn sort_or(&self, default: SortOrder) -> SortOrder {
        self.sort.unwrap_or(default)
    }
}
