//! Domain errors for remote record operations
//!
//! These errors abstract away the HTTP client used by adapters: no
//! reqwest types leak into the domain.

use thiserror::Error;

/// Errors raised by a record source or sink
///
/// Transport errors are never fatal to a sync pass. A failed page ends the
/// pull with partial results; a failed write is logged and the pass moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    Request(String),

    /// The remote answered with a non-success status
    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote answered, but the body is not what we expected
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The remote reported an application-level error
    #[error("Remote API error {code}: {description}")]
    Api { code: String, description: String },

    /// Adapter misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TransportError {
    /// Create a request error with a message
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create a status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error with a message
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an API error
    pub fn api(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Create a config error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let err = TransportError::status(503, "maintenance");
        assert!(matches!(err, TransportError::Status { status: 503, .. }));
        assert_eq!(err.to_string(), "Remote returned status 503: maintenance");
    }

    #[test]
    fn test_api_error() {
        let err = TransportError::api("QUERY_LIMIT_EXCEEDED", "Too many requests");
        assert!(err.to_string().contains("QUERY_LIMIT_EXCEEDED"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn test_request_error() {
        let err = TransportError::request("connection refused");
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }
}
