//! Request body params.
//!
//! The body of a POST or PUT is produced by anything implementing
//! [`BodyParams`]: a capability that serializes itself to body bytes and
//! names the content type those bytes carry. String maps encode as
//! `application/x-www-form-urlencoded` out of the box; [`JsonParams`] wraps
//! any `serde::Serialize` value as `application/json`; callers with exotic
//! payloads implement the trait themselves.

use crate::error::{RestError, Result};
use bytes::Bytes;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use url::form_urlencoded;

/// A value that can serve as a request body.
///
/// Serialization runs at request construction time; a failure is reported
/// synchronously as [`RestError::Serialization`] and no request is created.
pub trait BodyParams {
    /// The content type of the serialized body.
    fn content_type(&self) -> String;

    /// Serialize to body bytes.
    fn body(&self) -> Result<Bytes>;
}

fn form_encode<'a>(pairs: impl Iterator<Item = (&'a String, &'a String)>) -> Bytes {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Bytes::from(encoded)
}

impl BodyParams for BTreeMap<String, String> {
    fn content_type(&self) -> String {
        "application/x-www-form-urlencoded".to_string()
    }

    fn body(&self) -> Result<Bytes> {
        Ok(form_encode(self.iter()))
    }
}

impl BodyParams for HashMap<String, String> {
    fn content_type(&self) -> String {
        "application/x-www-form-urlencoded".to_string()
    }

    fn body(&self) -> Result<Bytes> {
        // Sort for a deterministic body regardless of hash order.
        let sorted: BTreeMap<&String, &String> = self.iter().collect();
        Ok(form_encode(sorted.into_iter()))
    }
}

/// Wraps any `Serialize` value as an `application/json` body.
///
/// # Examples
///
/// ```
/// use rest_client_http::client::{BodyParams, JsonParams};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Widget {
///     name: String,
/// }
///
/// let params = JsonParams(Widget { name: "foo".to_string() });
/// assert_eq!(params.content_type(), "application/json");
/// assert_eq!(&params.body().unwrap()[..], br#"{"name":"foo"}"#);
/// ```
pub struct JsonParams<T: Serialize>(pub T);

impl<T: Serialize> BodyParams for JsonParams<T> {
    fn content_type(&self) -> String {
        "application/json".to_string()
    }

    fn body(&self) -> Result<Bytes> {
        serde_json::to_vec(&self.0)
            .map(Bytes::from)
            .map_err(|e| RestError::Serialization(e.to_string()))
    }
}
