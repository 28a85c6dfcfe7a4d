//! Connection establishment
//!
//! Applies the requested options to a fresh socket and then drives the
//! handshake, blocking or bounded by the configured connect timeout.

use std::net::SocketAddr;

use socket2::SockAddr;

use super::pending::connect_with_timeout;
use super::socket_config::{ApplyReport, apply_options};
use crate::config::OptionSet;
use crate::connect::handle::{Configured, Connected, Created, SocketHandle};
use crate::error::{self, Result};

/// A connected handle together with what happened while configuring it
#[derive(Debug)]
pub struct Established {
    pub handle: SocketHandle<Connected>,
    pub report: ApplyReport,
}

/// Applies an [`OptionSet`] and connects.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionEstablisher<'a> {
    options: &'a OptionSet,
}

impl<'a> ConnectionEstablisher<'a> {
    #[must_use]
    pub fn new(options: &'a OptionSet) -> Self {
        Self { options }
    }

    /// Write every set option. Never fails: per-option errors are in the
    /// returned report.
    pub fn apply(&self, handle: SocketHandle<Created>) -> (SocketHandle<Configured>, ApplyReport) {
        let report = apply_options(self.options, handle.socket());
        (handle.into_configured(), report)
    }

    /// Run the handshake on a configured handle.
    ///
    /// On failure the handle is dropped, which closes the socket.
    ///
    /// # Errors
    ///
    /// `ConnectTimeout` when a connect timeout is configured and elapses,
    /// `Connect` for any other handshake failure.
    pub fn connect(
        &self,
        handle: SocketHandle<Configured>,
        addr: SocketAddr,
    ) -> Result<SocketHandle<Connected>> {
        match self.options.connect_timeout() {
            Some(timeout) => connect_with_timeout(handle.socket(), addr, timeout)?,
            None => handle
                .socket()
                .connect(&SockAddr::from(addr))
                .map_err(|e| error::connect(e).with_addr(addr))?,
        }

        tracing::debug!(%addr, "connected");
        Ok(handle.into_connected(addr))
    }

    /// [`apply`](Self::apply) followed by [`connect`](Self::connect).
    ///
    /// # Errors
    ///
    /// See [`connect`](Self::connect).
    pub fn establish(&self, handle: SocketHandle<Created>, addr: SocketAddr) -> Result<Established> {
        let (handle, report) = self.apply(handle);
        let handle = self.connect(handle, addr)?;
        Ok(Established { handle, report })
    }
}
