//! Receive / probe exchange loop
//!
//! Each received chunk is answered with [`PROBE_PAYLOAD`]. The loop ends when
//! the peer closes, a non-retryable receive error occurs, or the shutdown
//! signal is observed at the top of an iteration.

use std::fmt;
use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use super::observer::ExchangeObserver;
use super::shutdown::ShutdownSignal;
use crate::error::{self, Error, is_transient};

/// Fixed request sent after every receive.
pub const PROBE_PAYLOAD: &[u8] = b"GET / HTTP/1.0\r\n\r\n";

/// Receive buffer size.
pub const RECV_BUFFER_SIZE: usize = 4096;

/// Pause before retrying a would-block or interrupted receive.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(1);

/// Why the loop stopped
#[derive(Debug)]
pub enum ExchangeOutcome {
    /// Zero-length read
    PeerClosed,
    /// Shutdown signal observed
    Cancelled,
    /// Non-retryable receive error
    Failed(Error),
}

impl fmt::Display for ExchangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeOutcome::PeerClosed => f.write_str("Connection closed by peer."),
            ExchangeOutcome::Cancelled => f.write_str("Exchange stopped by interrupt."),
            ExchangeOutcome::Failed(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// Counters accumulated over one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeStats {
    pub receives: u64,
    pub bytes_received: u64,
    pub probes_sent: u64,
    pub send_failures: u64,
    pub retries: u64,
}

pub struct ExchangeLoop<'a, S> {
    stream: S,
    shutdown: &'a ShutdownSignal,
    stats: ExchangeStats,
}

impl<'a, S: Read + Write> ExchangeLoop<'a, S> {
    #[must_use]
    pub fn new(stream: S, shutdown: &'a ShutdownSignal) -> Self {
        Self {
            stream,
            shutdown,
            stats: ExchangeStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> ExchangeStats {
        self.stats
    }

    /// Give the stream back, e.g. to close it explicitly.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Run until a terminal condition.
    pub fn run<O: ExchangeObserver + ?Sized>(&mut self, observer: &mut O) -> ExchangeOutcome {
        let mut buffer = [0u8; RECV_BUFFER_SIZE];

        while !self.shutdown.is_triggered() {
            match self.stream.read(&mut buffer) {
                Ok(0) => return ExchangeOutcome::PeerClosed,
                Ok(n) => {
                    self.stats.receives += 1;
                    self.stats.bytes_received += n as u64;
                    observer.received(&buffer[..n]);
                    self.send_probe(observer);
                }
                Err(e) if is_transient(&e) => {
                    self.stats.retries += 1;
                    observer.retrying(&e);
                    thread::sleep(RETRY_BACKOFF);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "receive failed, ending exchange");
                    return ExchangeOutcome::Failed(error::io(e));
                }
            }
        }

        ExchangeOutcome::Cancelled
    }

    fn send_probe<O: ExchangeObserver + ?Sized>(&mut self, observer: &mut O) {
        observer.sending();
        let result = self
            .stream
            .write_all(PROBE_PAYLOAD)
            .map(|()| PROBE_PAYLOAD.len());

        match &result {
            Ok(_) => self.stats.probes_sent += 1,
            Err(e) => {
                tracing::warn!(error = %e, "probe send failed");
                self.stats.send_failures += 1;
            }
        }

        observer.sent(&result);
    }
}
