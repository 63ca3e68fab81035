//! Configuration types.

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "SIGNUP_API_BASE_URL";

/// Remote auth backend configuration.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Base URL of the auth backend, without a trailing slash. Empty means
    /// paths are used as-is (same-origin deployments behind a proxy).
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Read the base URL from `SIGNUP_API_BASE_URL` (unset is treated as empty).
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(BASE_URL_ENV).unwrap_or_default();
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if !trimmed.is_empty()
            && !trimmed.starts_with("http://")
            && !trimmed.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                key: BASE_URL_ENV.to_string(),
                message: format!("expected an http(s) URL or empty, got {trimmed:?}"),
            });
        }
        Ok(Self::new(trimmed))
    }

    /// Full URL for an API path. Leading slash on `path` is optional.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
