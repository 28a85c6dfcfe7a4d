use std::time::Duration;

/// A marker type to indicate that a bounded connect ran out of time.
#[derive(Debug, thiserror::Error)]
#[error("timed out after {0:?}")]
pub struct TimedOut(pub Duration);

/// A marker type to indicate that resolution produced no candidates.
#[derive(Debug, thiserror::Error)]
#[error("no addresses resolved for {0}")]
pub struct NoAddresses(pub String);

