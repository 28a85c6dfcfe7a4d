//! Pre-connect option application
//!
//! Every option present in the `OptionSet` is written; absent ones are never
//! touched. A failure on one option is recorded and logged, and the remaining
//! options are still attempted.

use std::fmt;
use std::time::Duration;

use crate::config::{KeepaliveTiming, Linger, OptionSet, SocketOption};
use crate::connect::tuner::TransportTuner;
use crate::error::{self, Error};

/// Value that was successfully written for one option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedValue {
    Flag(bool),
    Timing(KeepaliveTiming),
    Bytes(usize),
    Millis(u32),
    Seconds(u32),
    Linger(Linger),
}

/// Outcome of writing a single option
#[derive(Debug)]
pub struct OptionOutcome {
    pub option: SocketOption,
    pub result: Result<AppliedValue, Error>,
}

impl OptionOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for OptionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let option = self.option;
        match &self.result {
            Ok(AppliedValue::Flag(on)) => write!(f, "Set {option} = {}", u8::from(*on)),
            Ok(AppliedValue::Timing(timing)) => write!(
                f,
                "Set keepalive time={}ms, interval={}ms",
                timing.time_ms, timing.interval_ms
            ),
            Ok(AppliedValue::Bytes(bytes)) => write!(f, "Set {option} = {bytes} bytes"),
            Ok(AppliedValue::Millis(ms)) => write!(f, "Set {option} = {ms}ms"),
            Ok(AppliedValue::Seconds(secs)) => write!(f, "Set {option} = {secs} seconds"),
            Ok(AppliedValue::Linger(linger)) => write!(f, "Set {option} = {linger}"),
            Err(err) => match err.os_code() {
                Some(code) => write!(f, "Failed to set {option}: {code}"),
                None => write!(f, "Failed to set {option}: {err}"),
            },
        }
    }
}

/// Everything that happened while configuring one socket, in order
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<OptionOutcome>,
}

impl ApplyReport {
    #[must_use]
    pub fn failures(&self) -> impl Iterator<Item = &OptionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }

    #[must_use]
    pub fn outcome(&self, option: SocketOption) -> Option<&OptionOutcome> {
        self.outcomes.iter().find(|o| o.option == option)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Write every set option in `options` through `tuner`.
pub fn apply_options<T: TransportTuner + ?Sized>(options: &OptionSet, tuner: &T) -> ApplyReport {
    let mut report = ApplyReport::default();
    let mut record = |option: SocketOption, result: std::io::Result<AppliedValue>| {
        let result = result.map_err(|e| {
            tracing::warn!(%option, error = %e, "option not applied");
            error::option_apply(option, e)
        });
        report.outcomes.push(OptionOutcome { option, result });
    };

    if let Some(enabled) = options.keepalive {
        record(
            SocketOption::Keepalive,
            tuner.set_keepalive(enabled).map(|()| AppliedValue::Flag(enabled)),
        );
    }

    if let Some(timing) = options.keepalive_timing() {
        record(
            SocketOption::KeepaliveTiming,
            tuner
                .set_keepalive_timing(timing)
                .map(|()| AppliedValue::Timing(timing)),
        );
    }

    if let Some(enabled) = options.nodelay {
        record(
            SocketOption::NoDelay,
            tuner.set_nodelay(enabled).map(|()| AppliedValue::Flag(enabled)),
        );
    }

    if let Some(bytes) = options.max_segment {
        record(
            SocketOption::MaxSegment,
            tuner
                .set_max_segment(bytes)
                .map(|()| AppliedValue::Bytes(bytes as usize)),
        );
    }

    if let Some(ms) = options.send_timeout_ms {
        record(
            SocketOption::SendTimeout,
            tuner
                .set_send_timeout(io_timeout(ms))
                .map(|()| AppliedValue::Millis(ms)),
        );
    }

    if let Some(ms) = options.recv_timeout_ms {
        record(
            SocketOption::RecvTimeout,
            tuner
                .set_recv_timeout(io_timeout(ms))
                .map(|()| AppliedValue::Millis(ms)),
        );
    }

    if let Some(bytes) = options.send_buffer {
        record(
            SocketOption::SendBuffer,
            tuner.set_send_buffer(bytes).map(|()| AppliedValue::Bytes(bytes)),
        );
    }

    if let Some(bytes) = options.recv_buffer {
        record(
            SocketOption::RecvBuffer,
            tuner.set_recv_buffer(bytes).map(|()| AppliedValue::Bytes(bytes)),
        );
    }

    if let Some(linger) = options.linger {
        record(
            SocketOption::Linger,
            tuner.set_linger(linger).map(|()| AppliedValue::Linger(linger)),
        );
    }

    if let Some(secs) = options.max_retransmit_secs {
        record(
            SocketOption::MaxRetransmit,
            tuner
                .set_max_retransmit(Duration::from_secs(u64::from(secs)))
                .map(|()| AppliedValue::Seconds(secs)),
        );
    }

    report
}

/// Zero means "no timeout" for send/receive timeouts.
fn io_timeout(ms: u32) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(u64::from(ms)))
}
