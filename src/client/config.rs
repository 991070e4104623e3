//! Client configuration.

/// Configuration for a [`RestClient`](crate::client::RestClient).
///
/// Consumed once when the client is built; the settings here shape the
/// underlying transport and are not part of the client's mutable state.
///
/// # Examples
///
/// ```
/// use rest_client_http::client::ClientConfig;
///
/// let config = ClientConfig {
///     request_timeout_ms: 10_000,
///     ..Default::default()
/// };
/// assert_eq!(config.request_timeout_ms, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overall per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Connection-establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Maximum idle pooled connections kept per host.
    pub pool_max_idle_per_host: u32,
    /// `User-Agent` header sent by the transport.
    pub user_agent: String,
    /// Follow redirects transparently. When disabled, a 3xx response is
    /// delivered to the delegate as an HTTP-status outcome for the caller
    /// to inspect.
    pub follow_redirects: bool,
    /// Emit tracing events for request lifecycle (started/completed/failed).
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            pool_max_idle_per_host: 10,
            user_agent: concat!("rest_client_http/", env!("CARGO_PKG_VERSION")).to_string(),
            follow_redirects: true,
            enable_logging: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.connect_timeout_ms, 10_000);
        assert!(config.follow_redirects);
        assert!(config.enable_logging);
        assert!(config.user_agent.starts_with("rest_client_http/"));
    }
}
