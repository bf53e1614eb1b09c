//! Destination resolution
//!
//! Turns a user-supplied host string into a concrete IPv4 address. An
//! address literal is used as-is; anything else goes through one blocking
//! name lookup before the send loop starts.

use crate::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use tracing::info;

/// Resolve a destination host string into an IPv4 address
///
/// If `host` already parses as an IPv4 literal no lookup is performed.
/// Otherwise the system resolver is queried once and the first IPv4
/// result wins.
///
/// # Errors
///
/// Returns [`Error::Resolution`] when the lookup fails or yields no IPv4
/// address. Callers must abort before sending anything.
pub fn resolve_destination(host: &str) -> Result<Ipv4Addr> {
    // An address literal needs no resolver round-trip. Parsing is the test
    // here; an IPv4 literal is not all digits.
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(addr);
    }

    // The port is irrelevant for the lookup, ToSocketAddrs just needs one.
    let addrs = (host, 0)
        .to_socket_addrs()
        .map_err(|e| Error::resolution(host.to_string(), e.to_string()))?;

    let resolved = addrs
        .into_iter()
        .find_map(|addr| match addr.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| {
            Error::resolution(host.to_string(), "no IPv4 address found".to_string())
        })?;

    info!("Resolved destination hostname '{}' to {}", host, resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_bypasses_lookup() {
        // A literal must come back exactly as given, with no resolver call.
        let addr = resolve_destination("10.0.0.5").unwrap();
        assert_eq!(addr, Ipv4Addr::new(10, 0, 0, 5));
    }

    #[test]
    fn test_localhost_literal() {
        let addr = resolve_destination("127.0.0.1").unwrap();
        assert_eq!(addr, Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn test_unresolvable_host_errors() {
        // .invalid is reserved (RFC 2606) and never resolves.
        let result = resolve_destination("rtpgen-nonexistent.invalid");
        assert!(matches!(result, Err(Error::Resolution { .. })));
    }
}
