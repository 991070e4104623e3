//! Resource URL construction.
//!
//! Pure functions for composing a base URL with a resource path and an
//! optional query string. Both are deterministic: equal inputs always yield
//! equal output strings, which is what makes URL construction testable and
//! lets requests be compared by target.
//!
//! # Encoding Convention
//!
//! Query strings are encoded with [`form_urlencoded`]: reserved characters
//! are percent-escaped and the space character encodes as `+`. Keys are
//! emitted in sorted order regardless of how the caller built the map.
//!
//! [`form_urlencoded`]: url::form_urlencoded

use crate::error::{RestError, Result};
use crate::types::QueryParams;
use url::{form_urlencoded, Url};

/// Append an encoded query string to a resource path.
///
/// An empty map returns the path unchanged, with no trailing `?`. Otherwise the
/// result is `path?k=v&k2=v2` with keys in sorted order and values encoded
/// per the crate's convention (space as `+`).
///
/// # Examples
///
/// ```
/// use rest_client_http::client::append_query;
/// use rest_client_http::QueryParams;
///
/// let mut query = QueryParams::new();
/// query.insert("q".to_string(), "a b".to_string());
/// query.insert("page".to_string(), "2".to_string());
///
/// assert_eq!(append_query("/search", &query), "/search?page=2&q=a+b");
/// assert_eq!(append_query("/search", &QueryParams::new()), "/search");
/// ```
pub fn append_query(path: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        return path.to_string();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish();

    format!("{path}?{encoded}")
}

/// Join a base URL and a resource path with exactly one separating slash.
///
/// Trailing slashes on the base and leading slashes on the path are
/// normalized away, so every combination of the two composes to the same
/// URL. Fails with [`RestError::InvalidUrl`] when the joined string is not
/// a well-formed absolute URL.
///
/// # Examples
///
/// ```
/// use rest_client_http::client::join_url;
///
/// let a = join_url("http://api.example.com", "/users").unwrap();
/// let b = join_url("http://api.example.com/", "users").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "http://api.example.com/users");
/// ```
pub fn join_url(base: &str, path: &str) -> Result<Url> {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    let joined = if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    };

    Url::parse(&joined).map_err(|e| RestError::InvalidUrl(format!("{joined}: {e}")))
}

/// Join a base URL and a resource path, appending an encoded query string
/// when one is given.
///
/// Composition of [`append_query`] and [`join_url`].
pub fn url_for_resource_path(
    base: &str,
    path: &str,
    query: Option<&QueryParams>,
) -> Result<Url> {
    match query {
        Some(query) if !query.is_empty() => join_url(base, &append_query(path, query)),
        _ => join_url(base, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_join_single_slash_all_combinations() {
        let expected = "http://api.example.com/users";
        for base in ["http://api.example.com", "http://api.example.com/"] {
            for path in ["users", "/users"] {
                assert_eq!(join_url(base, path).unwrap().as_str(), expected);
            }
        }
    }

    #[test]
    fn test_join_nested_path() {
        let url = join_url("http://api.example.com/v1/", "/users/42").unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/v1/users/42");
    }

    #[test]
    fn test_join_rejects_malformed_base() {
        let err = join_url("not a url", "/users").unwrap_err();
        assert!(matches!(err, RestError::InvalidUrl(_)));
    }

    #[test]
    fn test_append_query_empty_map_is_identity() {
        assert_eq!(append_query("/search", &QueryParams::new()), "/search");
    }

    #[test]
    fn test_append_query_sorted_and_stable() {
        let q = query(&[("q", "a b"), ("page", "2")]);
        let first = append_query("/search", &q);
        assert_eq!(first, "/search?page=2&q=a+b");
        assert_eq!(append_query("/search", &q), first);
    }

    #[test]
    fn test_append_query_escapes_reserved_characters() {
        let q = query(&[("redirect", "https://example.com/?a=1&b=2")]);
        assert_eq!(
            append_query("/auth", &q),
            "/auth?redirect=https%3A%2F%2Fexample.com%2F%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn test_url_for_resource_path_composes() {
        let q = query(&[("page", "2")]);
        let url = url_for_resource_path("http://api.example.com", "/users", Some(&q)).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/users?page=2");

        let url = url_for_resource_path("http://api.example.com", "/users", None).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/users");
    }

    #[test]
    fn test_url_construction_is_pure() {
        let q = query(&[("a", "1"), ("b", "2")]);
        let first = url_for_resource_path("http://api.example.com", "/x", Some(&q)).unwrap();
        let second = url_for_resource_path("http://api.example.com", "/x", Some(&q)).unwrap();
        assert_eq!(first, second);
    }
}
