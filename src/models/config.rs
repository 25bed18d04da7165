//! Gateway configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GatewayError, Result};

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "NEWS_API_KEY";

/// Root gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Upstream provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Request quota settings
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Feed aggregation settings
    #[serde(default)]
    pub feed: FeedConfig,
}

impl GatewayConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if Url::parse(&self.provider.base_url).is_err() {
            return Err(GatewayError::validation(format!(
                "provider.base_url is not a valid URL: {}",
                self.provider.base_url
            )));
        }
        if self.provider.user_agent.trim().is_empty() {
            return Err(GatewayError::validation("provider.user_agent is empty"));
        }
        if self.provider.timeout_secs == 0 {
            return Err(GatewayError::validation("provider.timeout_secs must be > 0"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(GatewayError::validation("cache.ttl_secs must be > 0"));
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(GatewayError::validation(
                "cache.sweep_interval_secs must be > 0",
            ));
        }
        if self.quota.daily_cap == 0 {
            return Err(GatewayError::validation("quota.daily_cap must be > 0"));
        }
        if self.quota.per_second_cap == 0 {
            return Err(GatewayError::validation("quota.per_second_cap must be > 0"));
        }
        if self.feed.prefetch_factor < 1 {
            return Err(GatewayError::validation("feed.prefetch_factor must be >= 1"));
        }
        // The pacing interval must cover the inverse of the per-second cap,
        // or serialized calls can still trip the burst window.
        if self.feed.pacing_interval_ms * u64::from(self.quota.per_second_cap) < 1000 {
            return Err(GatewayError::validation(format!(
                "feed.pacing_interval_ms ({}) is under 1s / quota.per_second_cap ({})",
                self.feed.pacing_interval_ms, self.quota.per_second_cap
            )));
        }
        Ok(())
    }
}

/// Upstream provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider's content API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// API credential; falls back to the `NEWS_API_KEY` environment variable
    #[serde(default)]
    pub api_key: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

impl ProviderConfig {
    /// The API key from the config file, or from the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if !self.api_key.trim().is_empty() {
            return Ok(self.api_key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::config(format!(
                    "no API key: set provider.api_key or the {API_KEY_ENV} environment variable"
                ))
            })
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached page stays fresh
    #[serde(default = "defaults::cache_ttl")]
    pub ttl_secs: u64,

    /// Seconds between background sweep runs
    #[serde(default = "defaults::sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::cache_ttl(),
            sweep_interval_secs: defaults::sweep_interval(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Request quota settings: the provider-imposed budget this process shares
/// across every caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Calls allowed in the trailing 24 hours
    #[serde(default = "defaults::daily_cap")]
    pub daily_cap: u32,

    /// Calls allowed in the trailing second
    #[serde(default = "defaults::per_second_cap")]
    pub per_second_cap: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl QuotaConfig {
    /// Production caps matching the provider's free tier.
    pub fn strict() -> Self {
        Self {
            daily_cap: defaults::daily_cap(),
            per_second_cap: defaults::per_second_cap(),
        }
    }

    /// Raised caps for integration environments. Same algorithm, bigger
    /// budget.
    pub fn relaxed() -> Self {
        Self {
            daily_cap: 5000,
            per_second_cap: 10,
        }
    }
}

/// Feed aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Over-fetch multiplier for preference aggregation
    #[serde(default = "defaults::prefetch_factor")]
    pub prefetch_factor: u32,

    /// Minimum gap between successive upstream calls in milliseconds
    #[serde(default = "defaults::pacing_interval")]
    pub pacing_interval_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            prefetch_factor: defaults::prefetch_factor(),
            pacing_interval_ms: defaults::pacing_interval(),
        }
    }
}

impl FeedConfig {
    pub fn pacing_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_interval_ms)
    }
}

mod defaults {
    // Provider defaults
    pub fn base_url() -> String {
        "https://content.guardianapis.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; newsgate/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Cache defaults
    pub fn cache_ttl() -> u64 {
        15 * 60
    }
    pub fn sweep_interval() -> u64 {
        5 * 60
    }

    // Quota defaults
    pub fn daily_cap() -> u32 {
        500
    }
    pub fn per_second_cap() -> u32 {
        1
    }

    // Feed defaults
    pub fn prefetch_factor() -> u32 {
        3
    }
    pub fn pacing_interval() -> u64 {
        1100
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(GatewayConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_ttl() {
        let mut config = GatewayConfig::default();
        config.cache.ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_daily_cap() {
        let mut config = GatewayConfig::default();
        config.quota.daily_cap = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_pacing_under_burst_window() {
        let mut config = GatewayConfig::default();
        config.feed.pacing_interval_ms = 900;
        config.quota.per_second_cap = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_fast_pacing_with_raised_burst_cap() {
        let mut config = GatewayConfig::default();
        config.quota = QuotaConfig::relaxed();
        config.feed.pacing_interval_ms = 110;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relaxed_caps_exceed_strict() {
        let strict = QuotaConfig::strict();
        let relaxed = QuotaConfig::relaxed();
        assert!(relaxed.daily_cap > strict.daily_cap);
        assert!(relaxed.per_second_cap > strict.per_second_cap);
    }

    #[test]
    fn load_reads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[quota]\ndaily_cap = 42\n\n[provider]\napi_key = \"k\""
        )
        .unwrap();

        let config = GatewayConfig::load(file.path()).unwrap();
        assert_eq!(config.quota.daily_cap, 42);
        assert_eq!(config.quota.per_second_cap, 1);
        assert_eq!(config.cache.ttl_secs, 900);
        assert_eq!(config.provider.api_key, "k");
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = GatewayConfig::load_or_default("/nonexistent/gateway.toml");
        assert_eq!(config.quota.daily_cap, 500);
    }

    #[test]
    fn api_key_from_file_wins_over_env() {
        let config = ProviderConfig {
            api_key: "from-file".into(),
            ..ProviderConfig::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "from-file");
    }
}
