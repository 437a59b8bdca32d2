//! Error types for the upstream aggregation module

use thiserror::Error;

/// Errors that can occur while fetching records from the upstream API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The upstream rejected the supplied credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The page request exceeded the bounded timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Network or protocol failure
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The response body could not be decoded as JSON
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// Transport construction or configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl UpstreamError {
    /// True when the fault is an authorization rejection, the one case the
    /// aggregator retries under an alternate credential scheme
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<UpstreamError> for lessonsearch_core::error::Error {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unauthorized(msg) => Self::Unauthorized(msg),
            UpstreamError::Config(msg) => Self::Config(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}
