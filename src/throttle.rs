//! Rate limiting for local failure warnings.
//!
//! The append pipeline swallows dispatch failures, so a dead endpoint
//! would otherwise flood the local diagnostic channel with one warning per
//! event. Failures are counted here and the warning callback runs at most
//! once per interval, reporting how many accumulated since the last one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// How often repeated failure warnings may be emitted, in seconds.
pub const WARN_INTERVAL_SECS: u64 = 5;

/// Clock source, injectable for tests.
pub type TimeProvider = Box<dyn Fn() -> u64 + Send + Sync>;

/// Seconds since the UNIX epoch, or 0 if the clock is before it.
fn system_time_provider() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Counts failures and limits how often a warning callback runs.
///
/// The first warning after construction is not delayed; subsequent ones
/// wait out the interval while the counter accumulates.
pub struct WarnThrottle {
    last_warn: AtomicU64,
    failures: AtomicU64,
    interval: u64,
    time_provider: TimeProvider,
}

impl WarnThrottle {
    pub fn new() -> Self {
        Self::with_time_provider(WARN_INTERVAL_SECS, Box::new(system_time_provider))
    }

    /// Create a throttle with an explicit interval and clock.
    pub fn with_time_provider(interval: u64, time_provider: TimeProvider) -> Self {
        Self {
            last_warn: AtomicU64::new(time_provider().saturating_sub(interval)),
            failures: AtomicU64::new(0),
            interval,
            time_provider,
        }
    }

    /// Count one failure.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Run `warn` with the accumulated count if the interval has elapsed.
    pub fn warn_if_due(&self, mut warn: impl FnMut(u64)) {
        let now = (self.time_provider)();
        let prev = self.last_warn.load(Ordering::Relaxed);
        if now.saturating_sub(prev) >= self.interval {
            let count = self.failures.swap(0, Ordering::Relaxed);
            if count > 0 {
                warn(count);
            }
            self.last_warn.store(now, Ordering::Relaxed);
        }
    }
}

impl Default for WarnThrottle {
    fn default() -> Self {
        Self::new()
    }
}
