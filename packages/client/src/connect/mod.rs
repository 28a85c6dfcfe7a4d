//! Socket lifecycle and connection establishment
//!
//! [`SocketHandle`] owns the OS socket, [`TransportTuner`] abstracts option
//! access, and [`tcp`] holds resolution, option application and the connect
//! state machine.

pub mod handle;
pub mod tcp;
pub mod tuner;

pub use handle::{Configured, Connected, Created, SocketHandle};
pub use tcp::{
    AppliedValue, ApplyReport, ConnectState, ConnectionEstablisher, Established, OptionOutcome,
    apply_options, resolve_first, resolve_host_sync,
};
pub use tuner::TransportTuner;
