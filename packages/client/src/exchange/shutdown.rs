//! Cooperative cancellation

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag polled by the exchange loop between blocking calls.
///
/// Triggering it never interrupts an in-flight receive; the loop notices on
/// its next iteration.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that is already set, mostly useful in tests.
    #[must_use]
    pub fn triggered() -> Self {
        let signal = Self::new();
        signal.trigger();
        signal
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}
