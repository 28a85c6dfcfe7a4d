//! Types most callers need, in one import

pub use crate::config::{KeepaliveTiming, Linger, OptionFlag, OptionSet, SocketOption};
pub use crate::connect::{
    AppliedValue, ApplyReport, Configured, Connected, ConnectionEstablisher, Created, Established,
    OptionOutcome, SocketHandle, TransportTuner, resolve_first, resolve_host_sync,
};
pub use crate::error::{Error, Kind, Result};
pub use crate::exchange::{
    ExchangeLoop, ExchangeObserver, ExchangeOutcome, ExchangeStats, NoopObserver, PROBE_PAYLOAD,
    ShutdownSignal,
};
pub use crate::report::EffectiveOptions;
