//! TCP connection utilities
//!
//! Resolution, pre-connect option application and the (optionally bounded)
//! connect handshake.

pub mod basic_connection;
pub mod dns_resolution;
pub mod pending;
pub mod socket_config;

pub use basic_connection::{ConnectionEstablisher, Established};
pub use dns_resolution::{resolve_first, resolve_host_sync};
pub use pending::{ConnectState, connect_with_timeout};
pub use socket_config::{AppliedValue, ApplyReport, OptionOutcome, apply_options};
