//! Core request/response types.

use crate::error::{RestError, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Query parameters for a request.
///
/// A sorted map so that the encoded query string is deterministic no matter
/// how the caller assembled the parameters.
pub type QueryParams = BTreeMap<String, String>;

/// The value delivered to a request's completion delegate, exactly once per
/// started request.
pub type RequestOutcome = std::result::Result<RestResponse, RestError>;

/// A successful HTTP response.
///
/// Only produced for success statuses; non-success statuses are delivered as
/// [`RestError::HttpStatus`] instead, carrying the raw body.
#[derive(Debug, Clone)]
pub struct RestResponse {
    /// The response status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw response body.
    pub body: Bytes,
}

impl RestResponse {
    /// True when the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// A header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body decoded as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| RestError::Serialization(e.to_string()))
    }
}
