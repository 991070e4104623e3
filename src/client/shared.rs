//! The process-wide default client.
//!
//! A single optional [`RestClient`] slot with process lifetime. Callers that
//! configure one client for a whole application can install it here and
//! reach it from anywhere instead of threading the handle through every
//! call site.
//!
//! The slot starts out empty. [`RestClient::scoped_to`] installs the client
//! it returns only when the slot is still empty: first writer wins, and
//! the check-then-set happens under one lock so two concurrent first calls
//! can never both install their client.
//!
//! [`RestClient::scoped_to`]: crate::client::RestClient::scoped_to

use crate::client::RestClient;
use parking_lot::Mutex;

static DEFAULT_CLIENT: Mutex<Option<RestClient>> = Mutex::new(None);

/// The currently installed default client, if any.
///
/// Returns a handle sharing the installed client's state, not a copy of it.
pub fn default_client() -> Option<RestClient> {
    DEFAULT_CLIENT.lock().clone()
}

/// Install (or replace) the default client.
pub fn set_default_client(client: RestClient) {
    *DEFAULT_CLIENT.lock() = Some(client);
}

/// Install `client` as the default only if no default exists yet.
///
/// Returns true when the install happened. The lock is held across the
/// existence check and the write.
pub(crate) fn install_if_absent(client: &RestClient) -> bool {
    let mut slot = DEFAULT_CLIENT.lock();
    if slot.is_none() {
        *slot = Some(client.clone());
        true
    } else {
        false
    }
}

#[cfg(test)]
pub(crate) fn reset_default_client() {
    *DEFAULT_CLIENT.lock() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // The slot is process-global, so its whole lifecycle lives in one test
    // to keep parallel test runs from interfering with each other.
    #[test]
    fn test_default_client_lifecycle() {
        reset_default_client();
        assert!(default_client().is_none());

        // Two concurrent first-time scoped constructors: both must return a
        // client, exactly one of them becomes the default.
        let a = thread::spawn(|| RestClient::scoped_to("http://a.example.com"));
        let b = thread::spawn(|| RestClient::scoped_to("http://b.example.com"));
        let a = a.join().unwrap();
        let b = b.join().unwrap();

        let installed = default_client().expect("a default must be installed");
        let installed_base = installed.base_url();
        assert!(installed_base == a.base_url() || installed_base == b.base_url());

        // A later scoped constructor must not displace the winner.
        let _c = RestClient::scoped_to("http://c.example.com");
        assert_eq!(default_client().unwrap().base_url(), installed_base);

        // Explicit set always replaces.
        let replacement = RestClient::new("http://d.example.com");
        set_default_client(replacement);
        assert_eq!(
            default_client().unwrap().base_url(),
            "http://d.example.com"
        );

        // The default is a shared handle: mutations through it are visible
        // to every holder.
        default_client()
            .unwrap()
            .set_header("X-Env", "production");
        assert_eq!(
            default_client().unwrap().headers().get("X-Env").map(String::as_str),
            Some("production")
        );

        reset_default_client();
    }
}
