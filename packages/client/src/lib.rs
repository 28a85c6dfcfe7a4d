//! # tcprobe client
//!
//! Socket-level building blocks for a diagnostic TCP client: apply transport
//! tuning before the handshake, connect with an optional deadline, report
//! the values the OS really applied, then trade data with the peer until it
//! closes or the user stops the run.
//!
//! ## Flow
//!
//! ```no_run
//! use tcprobe_client::prelude::*;
//!
//! # fn main() -> tcprobe_client::Result<()> {
//! let options = OptionSet::new().with_nodelay(true).with_connect_timeout_ms(2_000);
//! let addr = resolve_first("example.com", 80)?;
//! let handle = SocketHandle::create(addr)?;
//!
//! let Established { handle, report } = ConnectionEstablisher::new(&options).establish(handle, addr)?;
//! for outcome in &report.outcomes {
//!     println!("{outcome}");
//! }
//!
//! let effective = EffectiveOptions::read_from(handle.socket());
//! let shutdown = ShutdownSignal::new();
//! let outcome = ExchangeLoop::new(handle, &shutdown).run(&mut NoopObserver);
//! println!("{effective:?} {outcome}");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod connect;
pub mod error;
pub mod exchange;
pub mod report;

pub mod prelude;

pub use crate::error::{Error, Result};
pub use crate::prelude::*;
