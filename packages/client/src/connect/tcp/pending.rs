//! Bounded connect state machine
//!
//! `Idle → Pending → {Connected, TimedOut, Failed}`. The socket is switched to
//! non-blocking mode, connect is issued, and an in-progress handshake is
//! waited on with a `mio::Poll` registered for writability. Blocking mode is
//! restored once connected.

use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use mio::{Events, Interest, Poll, Token};
use socket2::{SockAddr, Socket};

use crate::error::{self, Result};

const CONNECT: Token = Token(0);

/// Longest single wait before the socket is checked again
const SETTLE_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum ConnectState {
    Idle,
    Pending { deadline: Instant },
    Connected,
    TimedOut,
    Failed(io::Error),
}

impl ConnectState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConnectState::Connected | ConnectState::TimedOut | ConnectState::Failed(_)
        )
    }
}

/// Connect `socket` to `addr`, giving up after `timeout`.
///
/// # Errors
///
/// `ConnectTimeout` if the handshake is still pending at the deadline,
/// `Connect` for any failure reported by the OS.
pub fn connect_with_timeout(socket: &Socket, addr: SocketAddr, timeout: Duration) -> Result<()> {
    socket
        .set_nonblocking(true)
        .map_err(|e| error::connect(e).with_addr(addr))?;

    let target = SockAddr::from(addr);
    let mut state = ConnectState::Idle;

    loop {
        state = match state {
            ConnectState::Idle => start(socket, &target, timeout),
            ConnectState::Pending { deadline } => wait_writable(socket, deadline),
            ConnectState::Connected => {
                socket
                    .set_nonblocking(false)
                    .map_err(|e| error::connect(e).with_addr(addr))?;
                return Ok(());
            }
            ConnectState::TimedOut => {
                return Err(error::connect_timeout(timeout).with_addr(addr));
            }
            ConnectState::Failed(e) => return Err(error::connect(e).with_addr(addr)),
        };
    }
}

fn start(socket: &Socket, target: &SockAddr, timeout: Duration) -> ConnectState {
    match socket.connect(target) {
        Ok(()) => ConnectState::Connected,
        Err(e) if is_in_progress(&e) => ConnectState::Pending {
            deadline: Instant::now() + timeout,
        },
        Err(e) => ConnectState::Failed(e),
    }
}

/// Wait for the pending handshake to resolve or the deadline to pass.
fn wait_writable(socket: &Socket, deadline: Instant) -> ConnectState {
    // The poll registration takes ownership of its source, so register a
    // duplicate descriptor and leave the original with the handle.
    let probe = match socket.try_clone() {
        Ok(probe) => probe,
        Err(e) => return ConnectState::Failed(e),
    };
    let mut source = mio::net::TcpStream::from_std(probe.into());

    let mut poll = match Poll::new() {
        Ok(poll) => poll,
        Err(e) => return ConnectState::Failed(e),
    };
    if let Err(e) = poll
        .registry()
        .register(&mut source, CONNECT, Interest::WRITABLE)
    {
        return ConnectState::Failed(e);
    }

    let mut events = Events::with_capacity(4);
    loop {
        let now = Instant::now();
        if now >= deadline {
            // A completion that raced the deadline still counts.
            return settle(socket).unwrap_or(ConnectState::TimedOut);
        }

        match poll.poll(&mut events, Some((deadline - now).min(SETTLE_INTERVAL))) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return ConnectState::Failed(e),
        }

        // Readiness is edge-triggered; a missed edge must not turn a finished
        // handshake into a timeout, so the socket is checked on every wakeup.
        match settle(socket) {
            Some(state) => return state,
            None if events.is_empty() => {}
            None => tracing::debug!("spurious wakeup while connecting"),
        }
    }
}

/// Classify a readiness notification. `None` means still connecting.
fn settle(socket: &Socket) -> Option<ConnectState> {
    match socket.take_error() {
        Ok(Some(e)) | Err(e) => return Some(ConnectState::Failed(e)),
        Ok(None) => {}
    }

    match socket.peer_addr() {
        Ok(_) => Some(ConnectState::Connected),
        Err(e) if e.kind() == io::ErrorKind::NotConnected => None,
        Err(e) => Some(ConnectState::Failed(e)),
    }
}

fn is_in_progress(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        if err.raw_os_error() == Some(libc::EINPROGRESS) {
            return true;
        }
    }

    err.kind() == io::ErrorKind::WouldBlock
}
