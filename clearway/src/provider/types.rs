//! Provider error types.

use thiserror::Error;

/// Errors that can occur talking to the upstream mapping provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("upstream request failed: {0}")]
    Http(String),

    /// The request exceeded its bounded timeout
    #[error("upstream request timed out")]
    Timeout,

    /// Upstream answered with a non-success HTTP status
    #[error("upstream responded with HTTP {status}")]
    Status { status: u16 },

    /// Upstream body could not be parsed or was missing required fields
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    /// Upstream accepted the request but reported an application-level
    /// error status in the body (e.g. `REQUEST_DENIED`)
    #[error("upstream API error: {status}")]
    Api { status: String },

    /// The directions endpoint found no route (`ZERO_RESULTS`)
    #[error("no route found")]
    NoRoute,

    /// Internal coordination failure (e.g. a refresh task panicked)
    #[error("internal provider error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Whether this error is an upstream authorization rejection, the
    /// trigger for a forced session refresh.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ProviderError::Status { status: 401 | 403 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_detection() {
        assert!(ProviderError::Status { status: 401 }.is_auth_failure());
        assert!(ProviderError::Status { status: 403 }.is_auth_failure());
        assert!(!ProviderError::Status { status: 500 }.is_auth_failure());
        assert!(!ProviderError::Timeout.is_auth_failure());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ProviderError::Status { status: 502 }.to_string(),
            "upstream responded with HTTP 502"
        );
        assert_eq!(ProviderError::NoRoute.to_string(), "no route found");
        assert_eq!(
            ProviderError::Api {
                status: "REQUEST_DENIED".to_string()
            }
            .to_string(),
            "upstream API error: REQUEST_DENIED"
        );
    }
}
