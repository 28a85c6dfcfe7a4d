//! Exchange loop event hooks

use std::io;

/// Receives one callback per exchange event, typically to print status lines.
pub trait ExchangeObserver {
    /// A chunk of `payload.len()` bytes arrived.
    fn received(&mut self, payload: &[u8]);

    /// The probe is about to be sent.
    fn sending(&mut self) {}

    /// Result of sending the probe. Errors do not end the loop.
    fn sent(&mut self, result: &io::Result<usize>);

    /// A transient receive error; the loop will retry.
    fn retrying(&mut self, _err: &io::Error) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExchangeObserver for NoopObserver {
    fn received(&mut self, _payload: &[u8]) {}

    fn sent(&mut self, _result: &io::Result<usize>) {}
}
