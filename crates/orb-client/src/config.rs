//! Public configuration for the Orb client.
//!
//! `OrbClientConfig` is the stable builder callers use. The client resolves
//! it into `ClientSettings` once, at construction.

use std::time::Duration;
use url::Url;

use crate::error::{OrbError, OrbResult};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.withorb.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ORB_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "ORB_BASE_URL";

/// Configuration for the Orb client.
///
/// # Example
///
/// ```
/// use orb_client::OrbClientConfig;
/// use std::time::Duration;
///
/// let config = OrbClientConfig::new()
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(10))
///     .with_max_retries(4);
/// ```
#[derive(Debug, Clone)]
pub struct OrbClientConfig {
    /// Base URL, including the API version prefix
    pub(crate) base_url: String,
    /// Bearer token sent with every request
    pub(crate) api_key: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
    /// Run `validate()` on every decoded response
    pub(crate) validate_responses: bool,
}

impl Default for OrbClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            user_agent: concat!("orb-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
            validate_responses: false,
        }
    }
}

impl OrbClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `ORB_API_KEY` and `ORB_BASE_URL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for the Orb
    /// environment variables.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            config.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            config.base_url = url;
        }
        config
    }

    /// Set the base URL.
    ///
    /// Defaults to `https://api.withorb.com/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set an optional API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 2 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Validate every response before returning it.
    ///
    /// Off by default: unknown enum values and unrecognized union variants
    /// are kept and only reported when the caller validates.
    #[must_use]
    pub const fn with_response_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }

    /// Resolve into the settings the client runs with.
    pub(crate) fn resolve(&self) -> OrbResult<ClientSettings> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(OrbError::MissingApiKey)?;

        Ok(ClientSettings {
            base_url: Url::parse(&self.base_url)?,
            api_key,
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            max_retries: self.max_retries,
            retry_base_delay: self.retry_base_delay,
            validate_responses: self.validate_responses,
        })
    }
}

/// Resolved client settings.
#[derive(Debug, Clone)]
pub(crate) struct ClientSettings {
    pub base_url: Url,
    pub api_key: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u8,
    pub retry_base_delay: Duration,
    pub validate_responses: bool,
}

impl ClientSettings {
    /// Backoff before retry number `attempt` (1-based).
    pub fn retry_delay(&self, attempt: u8) -> Duration {
        self.retry_base_delay
            .saturating_mul(2u32.saturating_pow(u32::from(attempt.saturating_sub(1))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrbClientConfig::new();
        assert_eq!(config.base_url, "https://api.withorb.com/v1");
        assert!(config.user_agent.contains("orb-client"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.api_key.is_none());
        assert_eq!(config.max_retries, 2);
        assert!(!config.validate_responses);
    }

    #[test]
    fn test_builder_pattern() {
        let config = OrbClientConfig::new()
            .with_base_url("https://sandbox.example/v1")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5))
            .with_api_key("secret")
            .with_max_retries(5)
            .with_response_validation(true);

        assert_eq!(config.base_url, "https://sandbox.example/v1");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key, Some("secret".to_string()));
        assert_eq!(config.max_retries, 5);
        assert!(config.validate_responses);
    }

    #[test]
    fn test_from_lookup() {
        let config = OrbClientConfig::from_lookup(|key| match key {
            API_KEY_ENV => Some("env-key".to_string()),
            BASE_URL_ENV => Some("http://localhost:4010".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.base_url, "http://localhost:4010");

        let empty = OrbClientConfig::from_lookup(|_| Some(String::new()));
        assert!(empty.api_key.is_none());
        assert_eq!(empty.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolve_requires_api_key() {
        let result = OrbClientConfig::new().resolve();
        assert!(matches!(result, Err(OrbError::MissingApiKey)));

        let blank = OrbClientConfig::new().with_api_key("").resolve();
        assert!(matches!(blank, Err(OrbError::MissingApiKey)));
    }

    #[test]
    fn test_resolve_rejects_bad_url() {
        let result = OrbClientConfig::new()
            .with_api_key("k")
            .with_base_url("not a url")
            .resolve();
        assert!(matches!(result, Err(OrbError::InvalidUrl(_))));
    }

    #[test]
    fn test_retry_delay_doubles() {
        let settings = OrbClientConfig::new()
            .with_api_key("k")
            .with_retry_delay(Duration::from_millis(100))
            .resolve()
            .unwrap();
        assert_eq!(settings.retry_delay(1), Duration::from_millis(100));
        assert_eq!(settings.retry_delay(2), Duration::from_millis(200));
        assert_eq!(settings.retry_delay(3), Duration::from_millis(400));
    }
}
