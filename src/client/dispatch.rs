//! The REST client: scoped configuration and asynchronous dispatch.

use crate::client::config::ClientConfig;
use crate::client::params::BodyParams;
use crate::client::request::{RequestHandle, ResponseDelegate, RestRequest};
use crate::client::{reachability, resource_url, shared};
use crate::error::Result;
use crate::types::QueryParams;
use bytes::Bytes;
use http::Method;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Mutable configuration shared by every request a client creates.
#[derive(Debug, Default)]
struct ClientState {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    headers: BTreeMap<String, String>,
}

/// A client scoped to a base URL, carrying the credentials and default
/// headers stamped onto every request it creates.
///
/// Cloning is cheap and clones share state: a header set through one handle
/// is seen by requests subsequently built through any other. Requests take
/// a snapshot at construction time, so mutation is never retroactive.
///
/// # Examples
///
/// ```no_run
/// use rest_client_http::RestClient;
/// use std::sync::Arc;
///
/// # async fn run() -> rest_client_http::Result<()> {
/// let client = RestClient::scoped_to("http://api.example.com");
/// client.set_header("X-Token", "abc");
///
/// let handle = client.get("/users", Arc::new(|outcome: rest_client_http::RequestOutcome| {
///     println!("{outcome:?}");
/// }))?;
/// handle.finished().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    state: Arc<RwLock<ClientState>>,
}

impl RestClient {
    /// Create a client scoped to `base_url` with default configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Self {
        let redirects = if config.follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_max_idle_per_host(config.pool_max_idle_per_host as usize)
            .user_agent(config.user_agent.clone())
            .redirect(redirects)
            .build()
            .unwrap_or_default();

        RestClient {
            http,
            config: Arc::new(config),
            state: Arc::new(RwLock::new(ClientState {
                base_url: base_url.into(),
                ..ClientState::default()
            })),
        }
    }

    /// Create a client scoped to `base_url`; if no process-wide default
    /// client exists yet, the new client is installed as the default.
    ///
    /// The install is first-writer-wins: a later call never displaces an
    /// existing default. See [`crate::client::default_client`].
    pub fn scoped_to(base_url: impl Into<String>) -> Self {
        let client = Self::new(base_url);
        shared::install_if_absent(&client);
        client
    }

    /// Like [`RestClient::scoped_to`], with HTTP Basic credentials set on
    /// the new client before the default-install step.
    pub fn scoped_to_with_auth(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let client = Self::new(base_url);
        client.set_username(username);
        client.set_password(password);
        shared::install_if_absent(&client);
        client
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The base URL all resource paths are nested underneath.
    pub fn base_url(&self) -> String {
        self.state.read().base_url.clone()
    }

    /// Replace the base URL for requests created from now on.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        self.state.write().base_url = base_url.into();
    }

    /// The username used for HTTP Basic authentication.
    pub fn username(&self) -> Option<String> {
        self.state.read().username.clone()
    }

    /// Set the username used for HTTP Basic authentication.
    ///
    /// Credentials are stamped onto requests only when both username and
    /// password are present.
    pub fn set_username(&self, username: impl Into<String>) {
        self.state.write().username = Some(username.into());
    }

    /// The password used for HTTP Basic authentication.
    pub fn password(&self) -> Option<String> {
        self.state.read().password.clone()
    }

    /// Set the password used for HTTP Basic authentication.
    pub fn set_password(&self, password: impl Into<String>) {
        self.state.write().password = Some(password.into());
    }

    /// Remove both credentials.
    pub fn clear_credentials(&self) {
        let mut state = self.state.write();
        state.username = None;
        state.password = None;
    }

    /// Set a header sent with every request created from now on.
    ///
    /// Overwrites any prior value for the same name. Validation happens at
    /// request construction, not here.
    pub fn set_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.state.write().headers.insert(name.into(), value.into());
    }

    /// A copy of the current header map.
    pub fn headers(&self) -> BTreeMap<String, String> {
        self.state.read().headers.clone()
    }

    /// A resource path with an encoded query string appended.
    ///
    /// See [`append_query`](crate::client::append_query) for the encoding
    /// convention.
    pub fn resource_path_with_query(&self, path: &str, query: &QueryParams) -> String {
        resource_url::append_query(path, query)
    }

    /// The URL for a resource path under this client's base URL.
    pub fn url_for_resource_path(&self, path: &str) -> Result<Url> {
        resource_url::join_url(&self.base_url(), path)
    }

    /// The URL for a resource path with an encoded query string appended.
    pub fn url_for_resource_path_with_query(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<Url> {
        resource_url::url_for_resource_path(&self.base_url(), path, Some(query))
    }

    /// Best-effort check that the network path to a well-known external
    /// host is currently reachable. Advisory only; see
    /// [`is_network_available`](crate::client::is_network_available).
    pub fn is_network_available(&self) -> bool {
        reachability::is_network_available()
    }

    /// Build a GET request for a resource path, stamped with a snapshot of
    /// the client's current headers and credentials. The request is not
    /// started; callers needing a different method or manual control work
    /// with the returned [`RestRequest`] directly.
    pub fn request_with_resource_path(
        &self,
        path: &str,
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RestRequest> {
        self.build_request(Method::GET, path, None, None, delegate)
    }

    /// Fetch a resource via GET.
    ///
    /// Returns as soon as the exchange is enqueued; the outcome arrives at
    /// the delegate. Construction failures (bad URL, malformed header) are
    /// returned synchronously and nothing is dispatched.
    pub fn get(
        &self,
        path: &str,
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RequestHandle> {
        Ok(self
            .build_request(Method::GET, path, None, None, delegate)?
            .start())
    }

    /// Fetch a resource via GET with query parameters appended to the
    /// resource path.
    pub fn get_with_query(
        &self,
        path: &str,
        query: &QueryParams,
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RequestHandle> {
        Ok(self
            .build_request(Method::GET, path, Some(query), None, delegate)?
            .start())
    }

    /// Create a resource via POST with a serialized params body.
    pub fn post(
        &self,
        path: &str,
        params: &(impl BodyParams + ?Sized),
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RequestHandle> {
        let body = Some((params.body()?, params.content_type()));
        Ok(self
            .build_request(Method::POST, path, None, body, delegate)?
            .start())
    }

    /// Update a resource via PUT with a serialized params body.
    pub fn put(
        &self,
        path: &str,
        params: &(impl BodyParams + ?Sized),
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RequestHandle> {
        let body = Some((params.body()?, params.content_type()));
        Ok(self
            .build_request(Method::PUT, path, None, body, delegate)?
            .start())
    }

    /// Destroy a resource via DELETE.
    pub fn delete(
        &self,
        path: &str,
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RequestHandle> {
        Ok(self
            .build_request(Method::DELETE, path, None, None, delegate)?
            .start())
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<(Bytes, String)>,
        delegate: Arc<dyn ResponseDelegate>,
    ) -> Result<RestRequest> {
        // Snapshot under the read lock, then build without holding it.
        let (base_url, username, password, headers) = {
            let state = self.state.read();
            (
                state.base_url.clone(),
                state.username.clone(),
                state.password.clone(),
                state.headers.clone(),
            )
        };

        let url = resource_url::url_for_resource_path(&base_url, path, query)?;
        let credentials = match (&username, &password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        };

        RestRequest::build(
            self.http.clone(),
            method,
            url,
            &headers,
            credentials,
            body,
            delegate,
            self.config.enable_logging,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;
    use crate::types::RequestOutcome;

    fn noop_delegate() -> Arc<dyn ResponseDelegate> {
        Arc::new(|_outcome: RequestOutcome| {})
    }

    #[test]
    fn test_state_accessors() {
        let client = RestClient::new("http://api.example.com");
        assert_eq!(client.base_url(), "http://api.example.com");
        assert_eq!(client.username(), None);

        client.set_base_url("http://other.example.com");
        client.set_username("user");
        client.set_password("pass");
        assert_eq!(client.base_url(), "http://other.example.com");
        assert_eq!(client.username().as_deref(), Some("user"));
        assert_eq!(client.password().as_deref(), Some("pass"));

        client.clear_credentials();
        assert_eq!(client.username(), None);
        assert_eq!(client.password(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let client = RestClient::new("http://api.example.com");
        let other = client.clone();

        client.set_header("X-Token", "abc");
        assert_eq!(other.headers().get("X-Token").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_headers_returns_a_copy() {
        let client = RestClient::new("http://api.example.com");
        client.set_header("X-Token", "abc");

        let mut copy = client.headers();
        copy.insert("X-Other".to_string(), "1".to_string());
        assert!(!client.headers().contains_key("X-Other"));
    }

    #[test]
    fn test_last_write_wins_per_header_name() {
        let client = RestClient::new("http://api.example.com");
        client.set_header("X-Token", "old");
        client.set_header("X-Token", "new");
        assert_eq!(client.headers().get("X-Token").map(String::as_str), Some("new"));
    }

    #[test]
    fn test_request_snapshot_is_not_retroactive() {
        let client = RestClient::new("http://api.example.com");
        client.set_header("X-Token", "abc");

        let request = client
            .request_with_resource_path("/users", noop_delegate())
            .unwrap();
        assert_eq!(request.headers().get("x-token").unwrap(), "abc");

        client.set_header("X-Token", "changed");
        client.set_header("X-New", "1");
        assert_eq!(request.headers().get("x-token").unwrap(), "abc");
        assert!(!request.headers().contains_key("x-new"));
    }

    #[test]
    fn test_url_builders_use_current_base() {
        let client = RestClient::new("http://api.example.com/");
        let url = client.url_for_resource_path("/users").unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/users");

        let mut query = QueryParams::new();
        query.insert("page".to_string(), "2".to_string());
        let url = client
            .url_for_resource_path_with_query("/users", &query)
            .unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/users?page=2");

        assert_eq!(
            client.resource_path_with_query("/users", &query),
            "/users?page=2"
        );
    }

    #[test]
    fn test_invalid_base_url_fails_synchronously() {
        let client = RestClient::new("not a url");
        let err = client
            .request_with_resource_path("/users", noop_delegate())
            .unwrap_err();
        assert!(matches!(err, RestError::InvalidUrl(_)));
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_failing_params_fail_synchronously() {
        struct Unserializable;

        impl BodyParams for Unserializable {
            fn content_type(&self) -> String {
                "application/octet-stream".to_string()
            }

            fn body(&self) -> crate::error::Result<Bytes> {
                Err(RestError::Serialization("no body representation".into()))
            }
        }

        let client = RestClient::new("http://api.example.com");
        let err = client
            .post("/widgets", &Unserializable, noop_delegate())
            .unwrap_err();
        assert!(matches!(err, RestError::Serialization(_)));
    }

    #[test]
    fn test_factory_request_defaults_to_get() {
        let client = RestClient::new("http://api.example.com");
        let request = client
            .request_with_resource_path("/users", noop_delegate())
            .unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "http://api.example.com/users");
        assert!(request.body().is_none());
    }
}
