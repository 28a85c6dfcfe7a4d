//! Read-back of the options the OS actually applied
//!
//! The kernel may clamp or round requested values (Linux doubles buffer
//! sizes, for one), so the snapshot is taken after connecting and shown
//! as-is. A field that cannot be read is simply left out.

use std::io;
use std::time::Duration;

use crate::config::{Linger, SocketOption};
use crate::connect::tuner::TransportTuner;

/// Point-in-time view of the effective socket options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveOptions {
    pub keepalive: Option<bool>,
    pub nodelay: Option<bool>,
    pub max_segment: Option<u32>,
    pub send_buffer: Option<usize>,
    pub recv_buffer: Option<usize>,
    pub linger: Option<Linger>,
    pub max_retransmit: Option<Duration>,
}

impl EffectiveOptions {
    /// Query every reported option from `tuner`.
    pub fn read_from<T: TransportTuner + ?Sized>(tuner: &T) -> Self {
        Self {
            keepalive: read(SocketOption::Keepalive, tuner.keepalive()),
            nodelay: read(SocketOption::NoDelay, tuner.nodelay()),
            max_segment: read(SocketOption::MaxSegment, tuner.max_segment()),
            send_buffer: read(SocketOption::SendBuffer, tuner.send_buffer()),
            recv_buffer: read(SocketOption::RecvBuffer, tuner.recv_buffer()),
            linger: read(SocketOption::Linger, tuner.linger()),
            // An unset retransmission limit reads back as zero seconds.
            max_retransmit: read(SocketOption::MaxRetransmit, tuner.max_retransmit())
                .map(|limit| limit.unwrap_or(Duration::ZERO)),
        }
    }

    /// Max retransmission limit in whole seconds
    #[must_use]
    pub fn max_retransmit_secs(&self) -> Option<u64> {
        self.max_retransmit.map(|limit| limit.as_secs())
    }

    /// Display lines for every field that could be read
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(7);

        if let Some(on) = self.keepalive {
            lines.push(format!("{}: {}", SocketOption::Keepalive, u8::from(on)));
        }
        if let Some(on) = self.nodelay {
            lines.push(format!("{}: {}", SocketOption::NoDelay, u8::from(on)));
        }
        if let Some(mss) = self.max_segment {
            lines.push(format!("{}: {mss}", SocketOption::MaxSegment));
        }
        if let Some(bytes) = self.send_buffer {
            lines.push(format!("{}: {bytes} bytes", SocketOption::SendBuffer));
        }
        if let Some(bytes) = self.recv_buffer {
            lines.push(format!("{}: {bytes} bytes", SocketOption::RecvBuffer));
        }
        if let Some(linger) = self.linger {
            lines.push(format!("{}: {linger}", SocketOption::Linger));
        }
        if let Some(secs) = self.max_retransmit_secs() {
            lines.push(format!("{}: {secs} seconds", SocketOption::MaxRetransmit));
        }

        lines
    }
}

fn read<V>(option: SocketOption, value: io::Result<V>) -> Option<V> {
    match value {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(%option, error = %e, "option not readable");
            None
        }
    }
}
