//! Monotonic time as seen by the [`Collector`](crate::Collector).
//!
//! Timestamps on the wire are never trusted; every reading is stamped with
//! the collector's own clock when it is handled.

use core::cell::Cell;

use embassy_time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

impl<T> Clock for &T
where
    T: Clock,
{
    fn now(&self) -> Instant {
        (*self).now()
    }
}

/// The system's monotonic clock, through the `embassy-time` driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to, for replaying captured bus logs
/// with their recorded timestamps.
///
/// ```
/// # use n2k_meteo::{Clock, ReplayClock};
/// # use embassy_time::{Duration, Instant};
/// let clock = ReplayClock::new(Instant::from_secs(10));
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Instant::from_secs(15));
/// ```
#[derive(Debug, Clone)]
pub struct ReplayClock(Cell<Instant>);

impl ReplayClock {
    pub const fn new(start: Instant) -> Self {
        Self(Cell::new(start))
    }

    pub fn set(&self, now: Instant) {
        self.0.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ReplayClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// Time elapsed from `earlier` to `now`, zero if the clock appears to have
/// gone backwards.
#[inline]
pub(crate) fn elapsed(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::from_ticks(0))
}
