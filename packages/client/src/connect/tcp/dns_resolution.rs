//! Address resolution
//!
//! IP literals skip the resolver entirely; anything else goes through the
//! system resolver.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::error::{self, NoAddresses, Result};

/// Resolve hostname to socket addresses synchronously.
///
/// # Errors
///
/// Returns a `Resolve` error when the resolver fails or yields nothing.
pub fn resolve_host_sync(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    // Fast path for IP addresses
    if let Ok(ip) = IpAddr::from_str(host) {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let addr_vec: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(error::resolve)?
        .collect();

    if addr_vec.is_empty() {
        return Err(error::resolve(NoAddresses(host.to_string())));
    }

    tracing::debug!(host, candidates = addr_vec.len(), "resolved");
    Ok(addr_vec)
}

/// Resolve and keep the first candidate, which is the one the probe uses.
///
/// # Errors
///
/// Same as [`resolve_host_sync`].
pub fn resolve_first(host: &str, port: u16) -> Result<SocketAddr> {
    let mut candidates = resolve_host_sync(host, port)?.into_iter();
    let first = candidates
        .next()
        .ok_or_else(|| error::resolve(NoAddresses(host.to_string())))?;

    for skipped in candidates {
        tracing::debug!(%skipped, "ignoring additional candidate");
    }

    Ok(first)
}
