//! Error types and result handling.
//!
//! Construction-time failures (bad URLs, malformed headers, params that
//! cannot serialize) are returned synchronously from the dispatch methods.
//! Everything that happens after a request has been started (transport
//! failures, non-success HTTP statuses, cancellation) is delivered through
//! the request's completion delegate instead, never thrown back through the
//! call that started the exchange.

use bytes::Bytes;
use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RestError>;

/// Errors produced while building or executing a request.
#[derive(Error, Debug)]
pub enum RestError {
    /// The base URL and resource path did not compose into an absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value was rejected at request construction time.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The params value could not produce a request body.
    #[error("params serialization failed: {0}")]
    Serialization(String),

    /// Connection, timeout, or TLS failure surfaced from the transport.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    ///
    /// Carries the raw response body so callers can inspect whatever the
    /// server said about the failure.
    #[error("HTTP status {status}")]
    HttpStatus {
        /// The response status code.
        status: u16,
        /// The raw response body.
        body: Bytes,
    },

    /// The request was cancelled before the exchange finished.
    #[error("request cancelled")]
    Cancelled,
}

impl RestError {
    /// True for errors detected synchronously while building a request,
    /// before any bytes hit the wire.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            RestError::InvalidUrl(_) | RestError::InvalidHeader(_) | RestError::Serialization(_)
        )
    }

    /// The HTTP status code, for [`RestError::HttpStatus`] outcomes.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_classification() {
        assert!(RestError::InvalidUrl("x".into()).is_construction_error());
        assert!(RestError::InvalidHeader("x".into()).is_construction_error());
        assert!(RestError::Serialization("x".into()).is_construction_error());
        assert!(!RestError::Transport("x".into()).is_construction_error());
        assert!(!RestError::Cancelled.is_construction_error());
    }

    #[test]
    fn test_status_accessor() {
        let err = RestError::HttpStatus {
            status: 404,
            body: Bytes::from_static(b"missing"),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(RestError::Cancelled.status(), None);
    }

    #[test]
    fn test_display_includes_status() {
        let err = RestError::HttpStatus {
            status: 503,
            body: Bytes::new(),
        };
        assert_eq!(err.to_string(), "HTTP status 503");
    }
}
