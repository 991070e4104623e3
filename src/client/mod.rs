//! REST client implementation.
//!
//! This module provides a complete asynchronous client for RESTful HTTP
//! services, enabling callers to:
//!
//! - **Scope requests** under a shared base URL
//! - **Stamp credentials and headers** onto every request at construction
//! - **Dispatch asynchronously** and receive outcomes through delegates
//! - **Cancel in-flight requests** with an exactly-once completion report
//! - **Probe connectivity** before going to the network
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── dispatch     - RestClient and the convenience dispatch methods
//! ├── request      - RestRequest, RequestHandle, completion delegates
//! ├── params       - BodyParams capability and built-in implementations
//! ├── resource_url - URL joining and query-string encoding
//! ├── shared       - process-wide default client
//! ├── reachability - best-effort network probe
//! └── config       - client configuration
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RestClient`] | Scoped client with credential/header state |
//! | [`RestRequest`] | A built, not-yet-started request |
//! | [`RequestHandle`] | Cancellable handle to an in-flight request |
//! | [`ResponseDelegate`] | Exactly-once completion target |
//! | [`OutcomeChannel`] | Channel-backed delegate for await-style use |
//! | [`BodyParams`] | Serialized-body capability for POST/PUT params |
//! | [`ClientConfig`] | Transport configuration |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use rest_client_http::client::{ClientConfig, RestClient};
//!
//! // Default configuration
//! let client = RestClient::new("http://api.example.com");
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     request_timeout_ms: 10_000,
//!     ..Default::default()
//! };
//! let client = RestClient::with_config("http://api.example.com", config);
//! ```
//!
//! ## Building URLs
//!
//! ```
//! use rest_client_http::client::RestClient;
//! use rest_client_http::QueryParams;
//!
//! let client = RestClient::new("http://api.example.com/");
//! let url = client.url_for_resource_path("/users").unwrap();
//! assert_eq!(url.as_str(), "http://api.example.com/users");
//!
//! let mut query = QueryParams::new();
//! query.insert("page".to_string(), "2".to_string());
//! assert_eq!(client.resource_path_with_query("/users", &query), "/users?page=2");
//! ```
//!
//! ## Dispatching
//!
//! ```ignore
//! use rest_client_http::client::{OutcomeChannel, RestClient};
//!
//! let client = RestClient::scoped_to("http://api.example.com");
//! client.set_header("X-Token", "abc");
//!
//! let (delegate, mut outcomes) = OutcomeChannel::new();
//! client.get("/users", delegate)?;
//!
//! let (id, outcome) = outcomes.recv().await.unwrap();
//! ```

mod config;
mod dispatch;
mod params;
mod reachability;
mod request;
mod resource_url;
mod shared;

pub use config::ClientConfig;
pub use dispatch::RestClient;
pub use params::{BodyParams, JsonParams};
pub use reachability::is_network_available;
pub use request::{OutcomeChannel, RequestHandle, ResponseDelegate, RestRequest};
pub use resource_url::{append_query, join_url, url_for_resource_path};
pub use shared::{default_client, set_default_client};
