//! Extended keepalive timing
//!
//! Idle time and probe interval are configured as a pair. When only one half
//! is supplied the other takes the platform's traditional value.

use std::time::Duration;

/// Idle time before the first probe when only the interval was given.
pub const DEFAULT_KEEPALIVE_TIME_MS: u32 = 7_200_000;

/// Probe interval when only the idle time was given.
pub const DEFAULT_KEEPALIVE_INTERVAL_MS: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepaliveTiming {
    pub time_ms: u32,
    pub interval_ms: u32,
}

impl KeepaliveTiming {
    /// Combine the two optional halves, or `None` when neither is set.
    #[must_use]
    pub fn resolve(time_ms: Option<u32>, interval_ms: Option<u32>) -> Option<Self> {
        if time_ms.is_none() && interval_ms.is_none() {
            return None;
        }

        Some(Self {
            time_ms: time_ms.unwrap_or(DEFAULT_KEEPALIVE_TIME_MS),
            interval_ms: interval_ms.unwrap_or(DEFAULT_KEEPALIVE_INTERVAL_MS),
        })
    }

    #[must_use]
    pub fn time(&self) -> Duration {
        Duration::from_millis(u64::from(self.time_ms))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neither_half_set() {
        assert_eq!(KeepaliveTiming::resolve(None, None), None);
    }

    #[test]
    fn missing_half_falls_back() {
        let only_time = KeepaliveTiming::resolve(Some(30_000), None).unwrap();
        assert_eq!(only_time.time_ms, 30_000);
        assert_eq!(only_time.interval_ms, DEFAULT_KEEPALIVE_INTERVAL_MS);

        let only_interval = KeepaliveTiming::resolve(None, Some(5_000)).unwrap();
        assert_eq!(only_interval.time_ms, DEFAULT_KEEPALIVE_TIME_MS);
        assert_eq!(only_interval.interval(), Duration::from_secs(5));
    }
}
