// src/upstream/wire.rs

//! Serde mirror of the provider's response envelope.

use serde::Deserialize;

/// Top-level envelope: `{ "response": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchResults,
}

/// The payload of one search call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<ContentItem>,

    /// Provider-reported total across all pages; absent on some endpoints.
    #[serde(default)]
    pub total: Option<u64>,
}

/// One article record as the provider returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub web_title: String,

    #[serde(default)]
    pub web_url: String,

    #[serde(default)]
    pub web_publication_date: Option<String>,

    #[serde(default)]
    pub section_name: Option<String>,

    #[serde(default)]
    pub fields: Option<ContentFields>,
}

/// The optional field-selection block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFields {
    #[serde(default)]
    pub headline: Option<String>,

    #[serde(default)]
    pub trail_text: Option<String>,

    #[serde(default)]
    pub body_text: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,
}
