//! Time source for deadline checks.

use core::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Timestamp;

/// Supplies the current time for deadline checks and reserve snapshots.
///
/// Injected rather than read ambiently so tests can pin or advance time
/// deterministically.  `deadline` handling is a point-in-time
/// comparison, never a scheduled cancellation, so `now` is all a clock
/// has to provide.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Timestamp::new(seconds)
    }
}

/// A clock that only moves when told to.
///
/// # Examples
///
/// ```
/// use prism_dex::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::at(100);
/// clock.advance(50);
/// assert_eq!(clock.now().get(), 150);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: AtomicU64,
}

impl ManualClock {
    /// Creates a clock pinned at `seconds` since the epoch.
    #[must_use]
    pub fn at(seconds: u64) -> Self {
        Self {
            seconds: AtomicU64::new(seconds),
        }
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: u64) {
        self.seconds.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Pins the clock to an absolute time.
    pub fn set(&self, seconds: u64) {
        self.seconds.store(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.seconds.load(Ordering::SeqCst))
    }
}

/// A shared clock is still a clock; this is what lets a test hold on to
/// a [`ManualClock`] it already handed to a router.
impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        self.as_ref().now()
    }
}
