//! Owned socket with a compile-time lifecycle
//!
//! `SocketHandle<S>` moves forward through `Created → Configured →
//! Connected`. Options can only be applied before connecting and I/O is only
//! available once connected. Dropping the handle in any state closes the
//! socket exactly once.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{self, Result};

/// State marker: socket exists, nothing applied yet
#[derive(Debug, Clone, Copy)]
pub struct Created;

/// State marker: options applied, ready to connect
#[derive(Debug, Clone, Copy)]
pub struct Configured;

/// Handshake complete; carries the remote endpoint
#[derive(Debug, Clone, Copy)]
pub struct Connected {
    pub peer: SocketAddr,
}

pub struct SocketHandle<S = Created> {
    socket: Socket,
    /// Type state - stores actual state data, not just a marker
    state: S,
}

impl SocketHandle<Created> {
    /// Create a TCP socket matching the address family of `addr`.
    ///
    /// # Errors
    ///
    /// Returns a `SocketCreate` error if the OS refuses the socket.
    pub fn create(addr: SocketAddr) -> Result<Self> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(|e| error::socket_create(e).with_addr(addr))?;

        tracing::debug!(%addr, "socket created");

        Ok(Self::from_socket(socket))
    }

    /// Wrap an existing, unconnected socket.
    #[must_use]
    pub fn from_socket(socket: Socket) -> Self {
        Self {
            socket,
            state: Created,
        }
    }

    pub(crate) fn into_configured(self) -> SocketHandle<Configured> {
        SocketHandle {
            socket: self.socket,
            state: Configured,
        }
    }
}

impl SocketHandle<Configured> {
    pub(crate) fn into_connected(self, peer: SocketAddr) -> SocketHandle<Connected> {
        SocketHandle {
            socket: self.socket,
            state: Connected { peer },
        }
    }
}

impl SocketHandle<Connected> {
    #[must_use]
    pub fn peer_addr(&self) -> SocketAddr {
        self.state.peer
    }
}

impl<S> SocketHandle<S> {
    /// The underlying socket, for option application and read-back
    #[must_use]
    pub fn socket(&self) -> &Socket {
        &self.socket
    }

    /// Close the socket now rather than at end of scope.
    pub fn close(self) {
        tracing::debug!(state = std::any::type_name::<S>(), "closing socket");
        drop(self.socket);
    }
}

impl<S: fmt::Debug> fmt::Debug for SocketHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocketHandle")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Read for SocketHandle<Connected> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&self.socket).read(buf)
    }
}

impl Write for SocketHandle<Connected> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&self.socket).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&self.socket).flush()
    }
}
