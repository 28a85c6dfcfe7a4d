//! Command-line flag vocabulary
//!
//! Maps each `--name <value>` flag onto an [`OptionSet`] field. Values are
//! only checked for sign here; range checks are left to the OS.

use super::linger::Linger;
use super::options::OptionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFlag {
    Keepalive,
    KeepaliveTime,
    KeepaliveInterval,
    NoDelay,
    MaxSegment,
    ConnectTimeout,
    SendTimeout,
    RecvTimeout,
    SendBuffer,
    RecvBuffer,
    Linger,
    MaxRetransmit,
}

impl OptionFlag {
    pub const ALL: [OptionFlag; 12] = [
        OptionFlag::Keepalive,
        OptionFlag::KeepaliveTime,
        OptionFlag::KeepaliveInterval,
        OptionFlag::NoDelay,
        OptionFlag::MaxSegment,
        OptionFlag::ConnectTimeout,
        OptionFlag::SendTimeout,
        OptionFlag::RecvTimeout,
        OptionFlag::SendBuffer,
        OptionFlag::RecvBuffer,
        OptionFlag::Linger,
        OptionFlag::MaxRetransmit,
    ];

    /// Flag spelling including the leading dashes
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OptionFlag::Keepalive => "--keepalive",
            OptionFlag::KeepaliveTime => "--keepalive-time",
            OptionFlag::KeepaliveInterval => "--keepalive-interval",
            OptionFlag::NoDelay => "--nodelay",
            OptionFlag::MaxSegment => "--maxseg",
            OptionFlag::ConnectTimeout => "--connect-timeout",
            OptionFlag::SendTimeout => "--send-timeout",
            OptionFlag::RecvTimeout => "--recv-timeout",
            OptionFlag::SendBuffer => "--sendbuf",
            OptionFlag::RecvBuffer => "--recvbuf",
            OptionFlag::Linger => "--linger",
            OptionFlag::MaxRetransmit => "--maxrt",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Placeholder shown for the value in usage text
    #[must_use]
    pub fn value_hint(self) -> &'static str {
        match self {
            OptionFlag::Keepalive | OptionFlag::NoDelay => "<0|1>",
            OptionFlag::KeepaliveTime
            | OptionFlag::KeepaliveInterval
            | OptionFlag::ConnectTimeout
            | OptionFlag::SendTimeout
            | OptionFlag::RecvTimeout => "<ms>",
            OptionFlag::MaxSegment | OptionFlag::SendBuffer | OptionFlag::RecvBuffer => "<bytes>",
            OptionFlag::Linger | OptionFlag::MaxRetransmit => "<sec>",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            OptionFlag::Keepalive => "Enable/disable TCP keepalive (SO_KEEPALIVE)",
            OptionFlag::KeepaliveTime => "Time before sending keepalive probe (TCP_KEEPALIVE)",
            OptionFlag::KeepaliveInterval => "Interval between keepalive probes (TCP_KEEPINTVL)",
            OptionFlag::NoDelay => "Enable/disable Nagle's algorithm (TCP_NODELAY)",
            OptionFlag::MaxSegment => "Set maximum segment size (TCP_MAXSEG)",
            OptionFlag::ConnectTimeout => "Connection timeout in milliseconds",
            OptionFlag::SendTimeout => "Send timeout (SO_SNDTIMEO)",
            OptionFlag::RecvTimeout => "Receive timeout (SO_RCVTIMEO)",
            OptionFlag::SendBuffer => "Send buffer size (SO_SNDBUF)",
            OptionFlag::RecvBuffer => "Receive buffer size (SO_RCVBUF)",
            OptionFlag::Linger => "Linger time on close, -1 to disable (SO_LINGER)",
            OptionFlag::MaxRetransmit => "Maximum retransmission timeout in seconds (TCP_MAXRT)",
        }
    }

    /// Store `raw` into `options` if it passes this flag's sign rule.
    ///
    /// Returns whether the value was taken. Rejected values leave the field
    /// untouched, so a later occurrence of the same flag can still set it.
    pub fn accept(self, options: &mut OptionSet, raw: i64) -> bool {
        match self {
            OptionFlag::Keepalive => store(&mut options.keepalive, flag_value(raw)),
            OptionFlag::NoDelay => store(&mut options.nodelay, flag_value(raw)),
            OptionFlag::KeepaliveTime => store(&mut options.keepalive_time_ms, positive(raw)),
            OptionFlag::KeepaliveInterval => {
                store(&mut options.keepalive_interval_ms, positive(raw))
            }
            OptionFlag::MaxSegment => store(&mut options.max_segment, positive(raw)),
            OptionFlag::ConnectTimeout => store(&mut options.connect_timeout_ms, positive(raw)),
            OptionFlag::SendTimeout => store(&mut options.send_timeout_ms, non_negative(raw)),
            OptionFlag::RecvTimeout => store(&mut options.recv_timeout_ms, non_negative(raw)),
            OptionFlag::SendBuffer => store(&mut options.send_buffer, positive(raw)),
            OptionFlag::RecvBuffer => store(&mut options.recv_buffer, positive(raw)),
            OptionFlag::Linger => store(&mut options.linger, Linger::from_raw(raw)),
            OptionFlag::MaxRetransmit => {
                store(&mut options.max_retransmit_secs, non_negative(raw))
            }
        }
    }
}

fn store<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

fn flag_value(raw: i64) -> Option<bool> {
    (raw >= 0).then_some(raw != 0)
}

fn positive<T: TryFrom<i64>>(raw: i64) -> Option<T> {
    if raw > 0 { T::try_from(raw).ok() } else { None }
}

fn non_negative<T: TryFrom<i64>>(raw: i64) -> Option<T> {
    if raw >= 0 { T::try_from(raw).ok() } else { None }
}
