//! Error types for Orb API operations.

use orb_core::ValidationError;
use thiserror::Error;

/// Result type alias for Orb API operations.
pub type OrbResult<T> = Result<T, OrbError>;

/// Errors related to Orb API operations.
#[derive(Debug, Error)]
pub enum OrbError {
    /// API request failed with an HTTP error status.
    #[error("Orb API request failed with status {status}: {url}: {detail}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Error detail reported by the server, or the raw body
        detail: String,
    },

    /// The requested resource does not exist.
    #[error("Resource not found: {url}")]
    NotFound {
        /// The URL that was requested
        url: String,
    },

    /// The API key was rejected.
    #[error("Authentication failed with status {status}: {detail}")]
    AuthenticationFailed {
        /// HTTP status code (401 or 403)
        status: u16,
        /// Error detail reported by the server
        detail: String,
    },

    /// Too many requests.
    #[error("Rate limited by Orb API: {detail}")]
    RateLimited {
        /// Error detail reported by the server
        detail: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from Orb API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// A request parameter was rejected before sending.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// No API key was configured.
    #[error("No API key configured; set ORB_API_KEY or call with_api_key")]
    MissingApiKey,

    /// A decoded response failed validation.
    #[error("Response failed validation: {0}")]
    Validation(#[from] ValidationError),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl OrbError {
    /// Map a non-success HTTP status to an error.
    pub(crate) fn from_status(status: u16, url: &str, detail: String) -> Self {
        match status {
            404 => Self::NotFound {
                url: url.to_string(),
            },
            401 | 403 => Self::AuthenticationFailed { status, detail },
            429 => Self::RateLimited { detail },
            _ => Self::ApiRequestFailed {
                status,
                url: url.to_string(),
                detail,
            },
        }
    }

    /// HTTP status code, if this error came from a response.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequestFailed { status, .. } | Self::AuthenticationFailed { status, .. } => {
                Some(*status)
            }
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => !e.is_builder() && !e.is_decode(),
            Self::RateLimited { .. } => true,
            Self::ApiRequestFailed { status, .. } => {
                matches!(*status, 408 | 409) || *status >= 500
            }
            _ => false,
        }
    }
}
