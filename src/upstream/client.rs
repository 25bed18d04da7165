// src/upstream/client.rs

//! Reqwest-backed provider client with error mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{GatewayError, Result};
use crate::models::ProviderConfig;

use super::wire::{SearchEnvelope, SearchResults};
use super::{NewsSource, SearchRequest};

/// HTTP client for the provider's search endpoint.
///
/// Executes exactly one call per [`NewsSource::search`] invocation, bounded
/// by the configured timeout, with the credential appended to every request.
pub struct UpstreamClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/search", config.base_url.trim_end_matches('/')),
            api_key,
        })
    }
}

#[async_trait]
impl NewsSource for UpstreamClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let mut pairs = request.to_query_pairs();
        pairs.push(("api-key", self.api_key.clone()));

        log::debug!(
            "upstream call: page {} size {} section {:?}",
            request.page,
            request.page_size,
            request.section
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&pairs)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| GatewayError::UpstreamGeneric(format!("undecodable response body: {e}")))?;
        Ok(envelope.response)
    }
}

/// Map transport-level failures, where no HTTP status exists.
fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::UpstreamTimeout
    } else if error.is_connect() {
        GatewayError::UpstreamUnreachable(error.to_string())
    } else {
        GatewayError::UpstreamGeneric(error.to_string())
    }
}

/// Map a non-success HTTP status.
fn map_status_error(status: StatusCode) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::UpstreamConfigInvalid(status.as_u16())
        }
        StatusCode::TOO_MANY_REQUESTS => GatewayError::UpstreamOverloaded(status.as_u16()),
        s if s.is_server_error() => GatewayError::UpstreamServerError(s.as_u16()),
        s => GatewayError::UpstreamGeneric(format!("unexpected status {s}")),
    }
}
