//! Probe configuration
//!
//! The option model is built once from the command line (or the fluent
//! builder) and is read-only afterwards.

pub mod flags;
pub mod keepalive;
pub mod linger;
pub mod options;

pub use flags::OptionFlag;
pub use keepalive::{DEFAULT_KEEPALIVE_INTERVAL_MS, DEFAULT_KEEPALIVE_TIME_MS, KeepaliveTiming};
pub use linger::Linger;
pub use options::{OptionSet, SocketOption};
