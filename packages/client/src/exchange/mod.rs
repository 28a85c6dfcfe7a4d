//! Request/response exchange over a connected socket

pub mod observer;
pub mod probe_loop;
pub mod shutdown;

pub use observer::{ExchangeObserver, NoopObserver};
pub use probe_loop::{
    ExchangeLoop, ExchangeOutcome, ExchangeStats, PROBE_PAYLOAD, RECV_BUFFER_SIZE, RETRY_BACKOFF,
};
pub use shutdown::ShutdownSignal;
