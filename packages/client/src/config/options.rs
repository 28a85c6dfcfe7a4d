//! Requested transport options
//!
//! `OptionSet` records which options the caller asked for. Every field starts
//! out unset, and an unset field is never written to the socket.

use std::fmt;
use std::time::Duration;

use super::keepalive::KeepaliveTiming;
use super::linger::Linger;

/// Transport option families that can be written to a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketOption {
    Keepalive,
    KeepaliveTiming,
    NoDelay,
    MaxSegment,
    SendTimeout,
    RecvTimeout,
    SendBuffer,
    RecvBuffer,
    Linger,
    MaxRetransmit,
}

impl SocketOption {
    /// Conventional socket option name used in status output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocketOption::Keepalive => "SO_KEEPALIVE",
            SocketOption::KeepaliveTiming => "TCP_KEEPALIVE",
            SocketOption::NoDelay => "TCP_NODELAY",
            SocketOption::MaxSegment => "TCP_MAXSEG",
            SocketOption::SendTimeout => "SO_SNDTIMEO",
            SocketOption::RecvTimeout => "SO_RCVTIMEO",
            SocketOption::SendBuffer => "SO_SNDBUF",
            SocketOption::RecvBuffer => "SO_RCVBUF",
            SocketOption::Linger => "SO_LINGER",
            SocketOption::MaxRetransmit => "TCP_MAXRT",
        }
    }
}

impl fmt::Display for SocketOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport tuning requested for a single probe run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    pub keepalive: Option<bool>,
    pub keepalive_time_ms: Option<u32>,
    pub keepalive_interval_ms: Option<u32>,
    pub nodelay: Option<bool>,
    pub max_segment: Option<u32>,
    pub connect_timeout_ms: Option<u32>,
    pub send_timeout_ms: Option<u32>,
    pub recv_timeout_ms: Option<u32>,
    pub send_buffer: Option<usize>,
    pub recv_buffer: Option<usize>,
    pub linger: Option<Linger>,
    pub max_retransmit_secs: Option<u32>,
}

impl OptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no option would touch the socket (connect timeout excluded,
    /// it only shapes the handshake).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            keepalive,
            keepalive_time_ms,
            keepalive_interval_ms,
            nodelay,
            max_segment,
            connect_timeout_ms: _,
            send_timeout_ms,
            recv_timeout_ms,
            send_buffer,
            recv_buffer,
            linger,
            max_retransmit_secs,
        } = self;

        keepalive.is_none()
            && keepalive_time_ms.is_none()
            && keepalive_interval_ms.is_none()
            && nodelay.is_none()
            && max_segment.is_none()
            && send_timeout_ms.is_none()
            && recv_timeout_ms.is_none()
            && send_buffer.is_none()
            && recv_buffer.is_none()
            && linger.is_none()
            && max_retransmit_secs.is_none()
    }

    /// Keepalive timing to apply, with fallbacks filled in for whichever half
    /// was not given. `None` when neither was given.
    #[must_use]
    pub fn keepalive_timing(&self) -> Option<KeepaliveTiming> {
        KeepaliveTiming::resolve(self.keepalive_time_ms, self.keepalive_interval_ms)
    }

    /// Handshake bound; `None` selects a blocking connect.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms
            .filter(|ms| *ms > 0)
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }

    #[must_use]
    pub fn with_keepalive(mut self, enabled: bool) -> Self {
        self.keepalive = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_keepalive_time_ms(mut self, ms: u32) -> Self {
        self.keepalive_time_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_keepalive_interval_ms(mut self, ms: u32) -> Self {
        self.keepalive_interval_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_nodelay(mut self, enabled: bool) -> Self {
        self.nodelay = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_max_segment(mut self, bytes: u32) -> Self {
        self.max_segment = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_connect_timeout_ms(mut self, ms: u32) -> Self {
        self.connect_timeout_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_send_timeout_ms(mut self, ms: u32) -> Self {
        self.send_timeout_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_recv_timeout_ms(mut self, ms: u32) -> Self {
        self.recv_timeout_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_send_buffer(mut self, bytes: usize) -> Self {
        self.send_buffer = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_recv_buffer(mut self, bytes: usize) -> Self {
        self.recv_buffer = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_linger(mut self, linger: Linger) -> Self {
        self.linger = Some(linger);
        self
    }

    #[must_use]
    pub fn with_max_retransmit_secs(mut self, secs: u32) -> Self {
        self.max_retransmit_secs = Some(secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(OptionSet::new().is_empty());
        assert!(OptionSet::new().with_connect_timeout_ms(500).is_empty());
        assert!(!OptionSet::new().with_nodelay(false).is_empty());
    }

    #[test]
    fn zero_connect_timeout_means_blocking() {
        assert_eq!(OptionSet::new().with_connect_timeout_ms(0).connect_timeout(), None);
        assert_eq!(
            OptionSet::new().with_connect_timeout_ms(1500).connect_timeout(),
            Some(Duration::from_millis(1500))
        );
    }
}
