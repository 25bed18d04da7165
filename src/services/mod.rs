//! Service layer for the news gateway.
//!
//! This module contains the business logic for:
//! - Category feeds (`CategoryFeed`)
//! - Preference aggregation (`PreferenceFeed`)
//! - Free-text search (`SearchFeed`)
//! - Single-article lookup (`ArticleLookup`)

mod categories;
mod engine;
mod lookup;
mod preferences;
mod search;

pub use categories::CategoryFeed;
pub use engine::{CachedValue, FeedEngine};
pub use lookup::ArticleLookup;
pub use preferences::PreferenceFeed;
pub use search::SearchFeed;
