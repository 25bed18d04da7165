// src/error.rs

//! Unified error handling for the news gateway.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Unified gateway error type.
///
/// Every variant carries a stable machine-readable kind ([`GatewayError::kind`])
/// and an HTTP status hint ([`GatewayError::status_hint`]) so the surrounding
/// controller layer can map errors to responses without parsing error text.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Request parameters failed their constraints. Raised before any cache,
    /// quota, or network interaction.
    #[error("validation error: {0}")]
    Validation(String),

    /// Our own reservation was denied and no stale cache entry was available.
    #[error("request quota exhausted ({daily_count} calls in the trailing 24h)")]
    QuotaExhausted { daily_count: u32 },

    /// The upstream call exceeded its timeout.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// No HTTP response at all (DNS, connect, TLS failure).
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The provider rejected our credential.
    #[error("upstream rejected the API credential (status {0})")]
    UpstreamConfigInvalid(u16),

    /// The provider's own rate limit, distinct from the local quota.
    #[error("upstream rate limit hit (status {0})")]
    UpstreamOverloaded(u16),

    /// 5xx from the provider.
    #[error("upstream server error (status {0})")]
    UpstreamServerError(u16),

    /// Any other upstream failure, including undecodable response bodies.
    #[error("upstream request failed: {0}")]
    UpstreamGeneric(String),

    /// An id/URL lookup matched nothing.
    #[error("article not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GatewayError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Stable machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::QuotaExhausted { .. } => "quota_exhausted",
            Self::UpstreamTimeout => "upstream_timeout",
            Self::UpstreamUnreachable(_) => "upstream_unreachable",
            Self::UpstreamConfigInvalid(_) => "upstream_config_invalid",
            Self::UpstreamOverloaded(_) => "upstream_overloaded",
            Self::UpstreamServerError(_) => "upstream_server_error",
            Self::UpstreamGeneric(_) => "upstream_generic",
            Self::NotFound(_) => "not_found",
            Self::Config(_) | Self::Toml(_) => "config_invalid",
            Self::Io(_) | Self::Json(_) => "internal",
        }
    }

    /// HTTP status the controller layer should respond with.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::QuotaExhausted { .. } | Self::UpstreamOverloaded(_) => 429,
            Self::UpstreamTimeout => 504,
            Self::UpstreamUnreachable(_)
            | Self::UpstreamServerError(_)
            | Self::UpstreamGeneric(_) => 502,
            Self::UpstreamConfigInvalid(_) | Self::Config(_) | Self::Toml(_) => 500,
            Self::Io(_) | Self::Json(_) => 500,
        }
    }
}
