//! Close-time lingering

use std::fmt;
use std::time::Duration;

/// `SO_LINGER` setting.
///
/// On the command line `-1` selects [`Linger::Disabled`] and any value
/// `>= 0` selects [`Linger::Seconds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linger {
    Disabled,
    Seconds(u32),
}

impl Linger {
    /// Interpret a raw command-line value. Anything below `-1` is rejected.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 => Some(Linger::Disabled),
            n if n >= 0 => u32::try_from(n).ok().map(Linger::Seconds),
            _ => None,
        }
    }

    /// Form expected by socket APIs: `None` disables lingering.
    #[must_use]
    pub fn as_duration(self) -> Option<Duration> {
        match self {
            Linger::Disabled => None,
            Linger::Seconds(secs) => Some(Duration::from_secs(u64::from(secs))),
        }
    }

    /// Inverse of [`Linger::as_duration`], used when reading the option back.
    #[must_use]
    pub fn from_duration(value: Option<Duration>) -> Self {
        match value {
            None => Linger::Disabled,
            Some(d) => Linger::Seconds(u32::try_from(d.as_secs()).unwrap_or(u32::MAX)),
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, Linger::Seconds(_))
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        match self {
            Linger::Disabled => 0,
            Linger::Seconds(secs) => secs,
        }
    }
}

impl fmt::Display for Linger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_enabled() { "enabled" } else { "disabled" };
        write!(f, "{state} (linger={} sec)", self.seconds())
    }
}
