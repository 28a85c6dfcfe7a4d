//! tcprobe public API
//!
//! Diagnostic TCP client: tune a socket, connect, show what the kernel
//! actually accepted, then trade data with the peer until it closes or the
//! run is interrupted.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use tcprobe::{StatusPrinter, Tcprobe};
//!
//! let mut printer = StatusPrinter::stdout();
//! let summary = Tcprobe::target("127.0.0.1", 8080)
//!     .nodelay(true)
//!     .connect_timeout(Duration::from_secs(2))
//!     .run(&mut printer);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod cli;
pub mod display;

pub use builder::*;
pub use display::StatusPrinter;

pub use tcprobe_client::config::{Linger, OptionSet};
pub use tcprobe_client::exchange::{ExchangeOutcome, ShutdownSignal};
pub use tcprobe_client::{Error, Result};

/// Main tcprobe entry point
pub struct Tcprobe;

impl Tcprobe {
    /// Start building a probe against `host:port`
    ///
    /// Shorthand for `ProbeBuilder::new(host, port)`
    #[must_use]
    pub fn target(host: impl Into<String>, port: u16) -> ProbeBuilder {
        ProbeBuilder::new(host, port)
    }
}

/// Start building a probe against `host:port`
#[must_use]
pub fn target(host: impl Into<String>, port: u16) -> ProbeBuilder {
    ProbeBuilder::new(host, port)
}
