//! Transport client configuration.

use std::time::Duration;

use crate::error::ApiError;

/// Default base URL for the catalog API.
pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`ApiClient`](crate::ApiClient).
///
/// # Example
///
/// ```
/// use storefront_api::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new()
///     .with_base_url("https://staging.example.com/api/v1")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL all request paths are joined onto (no trailing slash).
    base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `STOREFRONT_API_URL` for the base URL; other settings keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if `STOREFRONT_API_URL` is set
    /// but empty.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("STOREFRONT_API_URL") {
            if url.trim().is_empty() {
                return Err(ApiError::InvalidConfig(
                    "STOREFRONT_API_URL is set but empty".to_string(),
                ));
            }
            config.base_url = url;
        }

        Ok(config)
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = ApiConfig::new().with_base_url("https://example.com/api/");
        assert_eq!(config.base_url(), "https://example.com/api");
    }
}
