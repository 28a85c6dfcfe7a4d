//! Fluent option setters
//!
//! Durations are stored with millisecond resolution, or second resolution for
//! the retransmission limit, saturating at `u32::MAX`.

use std::time::Duration;

use tcprobe_client::config::Linger;

use crate::builder::core::ProbeBuilder;

fn millis(value: Duration) -> u32 {
    u32::try_from(value.as_millis()).unwrap_or(u32::MAX)
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl ProbeBuilder {
    /// `SO_KEEPALIVE`
    #[must_use]
    pub fn keepalive(mut self, enabled: bool) -> Self {
        self.options = self.options.with_keepalive(enabled);
        self
    }

    /// Idle time before the first keepalive probe
    #[must_use]
    pub fn keepalive_time(mut self, idle: Duration) -> Self {
        self.options = self.options.with_keepalive_time_ms(millis(idle));
        self
    }

    #[must_use]
    pub fn keepalive_interval(mut self, interval: Duration) -> Self {
        self.options = self.options.with_keepalive_interval_ms(millis(interval));
        self
    }

    /// `TCP_NODELAY`
    #[must_use]
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.options = self.options.with_nodelay(enabled);
        self
    }

    /// `TCP_MAXSEG` in bytes
    #[must_use]
    pub fn max_segment(mut self, bytes: usize) -> Self {
        self.options = self.options.with_max_segment(saturate(bytes));
        self
    }

    /// Bound the handshake. A zero duration means no bound.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_connect_timeout_ms(millis(timeout));
        self
    }

    /// `SO_SNDTIMEO`; zero blocks indefinitely
    #[must_use]
    pub fn send_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_send_timeout_ms(millis(timeout));
        self
    }

    /// `SO_RCVTIMEO`; zero blocks indefinitely
    #[must_use]
    pub fn recv_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_recv_timeout_ms(millis(timeout));
        self
    }

    #[must_use]
    pub fn send_buffer(mut self, bytes: usize) -> Self {
        self.options = self.options.with_send_buffer(bytes);
        self
    }

    #[must_use]
    pub fn recv_buffer(mut self, bytes: usize) -> Self {
        self.options = self.options.with_recv_buffer(bytes);
        self
    }

    /// `SO_LINGER`
    #[must_use]
    pub fn linger(mut self, linger: Linger) -> Self {
        self.options = self.options.with_linger(linger);
        self
    }

    /// Time-based retransmission limit, whole seconds
    #[must_use]
    pub fn max_retransmit(mut self, limit: Duration) -> Self {
        let secs = u32::try_from(limit.as_secs()).unwrap_or(u32::MAX);
        self.options = self.options.with_max_retransmit_secs(secs);
        self
    }
}
