//! Core `ProbeBuilder` structure and base functionality

use tcprobe_client::config::OptionSet;
use tcprobe_client::exchange::ShutdownSignal;

/// Builder for one probe run against `host:port`
///
/// Every option starts unset, which leaves the operating system default in
/// place. Setters live in [`methods`](super::methods), execution in
/// [`run`](super::run).
#[derive(Debug, Clone)]
pub struct ProbeBuilder {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) options: OptionSet,
    pub(crate) shutdown: ShutdownSignal,
}

impl ProbeBuilder {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            options: OptionSet::new(),
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Replace the whole option set, e.g. one parsed from the command line.
    #[must_use]
    pub fn options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    /// Share a cancellation flag with the run. Triggering it ends the
    /// exchange loop after the receive in flight.
    #[must_use]
    pub fn shutdown_signal(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn option_set(&self) -> &OptionSet {
        &self.options
    }

    /// A handle to the flag this run watches
    #[must_use]
    pub fn signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }
}
