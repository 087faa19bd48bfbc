//! Generator error types.

use std::time::Duration;

use thiserror::Error;

/// Errors a content generator can report.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The call succeeded but produced no content.
    #[error("generator returned an empty response")]
    EmptyResponse,

    /// No response within the configured deadline.
    #[error("generator timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The selected backend cannot be built from the configuration.
    #[error("generator not configured: {0}")]
    NotConfigured(String),
}

impl GeneratorError {
    /// Whether a retry has a reasonable chance of succeeding.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::EmptyResponse | Self::NotConfigured(_) => false,
        }
    }

    /// Whether the failure means the generator could not be reached or
    /// refused to serve, as opposed to answering with unusable content.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        !matches!(self, Self::EmptyResponse)
    }
}
