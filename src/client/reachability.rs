//! Best-effort network reachability probing.
//!
//! A synchronous TCP connect against a well-known host, used to answer "is
//! there any network path right now?". The answer is advisory only: `true`
//! does not guarantee a subsequent request will succeed, and `false` does
//! not guarantee it will fail. Absence of information is reported as
//! unavailable.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Host probed by [`is_network_available`].
const PROBE_HOST: &str = "google.com:443";

/// Per-connection bound so the probe can never hang the caller.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Check whether the network path to a well-known external host is
/// currently reachable.
///
/// Blocks for at most the internal probe timeout per resolved address.
/// Every failure mode (DNS lookup failure, connect refusal, timeout)
/// collapses to `false`; this function never panics and never returns an
/// error.
pub fn is_network_available() -> bool {
    probe_host(PROBE_HOST, PROBE_TIMEOUT)
}

pub(crate) fn probe_host(host: &str, timeout: Duration) -> bool {
    let addrs = match host.to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(_) => return false,
    };

    for addr in addrs {
        if TcpStream::connect_timeout(&addr, timeout).is_ok() {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_probe_reaches_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(probe_host(&addr.to_string(), Duration::from_secs(1)));
    }

    #[test]
    fn test_probe_unresolvable_host_is_false() {
        // RFC 6761 reserves .invalid, so resolution always fails.
        assert!(!probe_host("host.invalid:443", Duration::from_millis(100)));
    }

    #[test]
    fn test_probe_missing_port_is_false() {
        assert!(!probe_host("google.com", Duration::from_millis(100)));
    }
}
