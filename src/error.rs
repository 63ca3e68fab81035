//! Error types for signup-flow.

use serde_json::Value;

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Durable token store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt token record: {0}")]
    Corrupt(String),
}

/// Errors surfaced by the remote auth/onboarding API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is derived from the decoded payload
    /// (`detail`, then `message`, then the stringified payload) with a
    /// generic fallback; `payload` keeps the raw body for caller inspection.
    #[error("{message}")]
    Request {
        status: u16,
        payload: Value,
        message: String,
    },

    /// Network failure or undecodable success body.
    #[error("Network error: {0}")]
    Transport(String),

    /// An authenticated call was attempted with no token in the store.
    #[error("Not signed in (no stored token)")]
    MissingToken,

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status of a failed request, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means the caller is not (or no longer) authenticated.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingToken)
            || matches!(
                self,
                Self::Request {
                    status: 401 | 403,
                    ..
                }
            )
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
