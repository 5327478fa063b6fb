//! Barometric tendency over the last hour.
//!
//! Raw readings are averaged into bins of [`BIN_INTERVAL`](super::BIN_INTERVAL),
//! and the bins of the trailing [`TREND_WINDOW`](super::TREND_WINDOW) are
//! classified with the thresholds weather services use for "rising rapidly"
//! and "falling rapidly":
//!
//! * a change of 2.0 hPa per hour or more which totals 0.6 hPa or more is
//!   [`Rising`](PressureTrend::Rising) or [`Falling`](PressureTrend::Falling),
//! * a pressure that strays 1.0 hPa or more from the mean of the window is
//!   [`Unsteady`](PressureTrend::Unsteady),
//! * anything else is [`Steady`](PressureTrend::Steady).

use embassy_time::{Duration, Instant};
use heapless::Deque;

use super::push_evicting;
use crate::time::elapsed;

/// Upper bound on the number of bins kept. The default configuration needs
/// 12.
pub const MAX_TREND_BINS: usize = 16;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// hPa per hour.
const RAPID_RATE: f64 = 2.0;

/// hPa.
const RAPID_TOTAL: f64 = 0.6;

/// hPa.
const UNSTEADY_SPREAD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureTrend {
    #[default]
    Steady,
    Unsteady,
    Rising,
    Falling,
}

/// Mean pressure over one bin interval, stamped when the bin was closed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrendBin {
    pub timestamp: Instant,
    pub pressure_hpa: f64,
}

/// Classify bins given oldest first.
///
/// The bins are walked from the newest backwards. Consecutive steps that keep
/// the rapid rate in the same direction accumulate, and the first time the
/// total crosses the threshold decides the trend. A single step that does not
/// continue the run ends rapid-change detection for the rest of the walk,
/// even if older bins would show a run of their own.
pub fn classify<'a, I>(bins: I) -> PressureTrend
where
    I: IntoIterator<Item = &'a TrendBin>,
    I::IntoIter: DoubleEndedIterator,
{
    // None once the run has been broken
    let mut acc = Some(0.0);
    let mut newer: Option<&TrendBin> = None;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0u32;

    for bin in bins.into_iter().rev() {
        if let (Some(next), Some(total)) = (newer, acc) {
            let delta = next.pressure_hpa - bin.pressure_hpa;
            let dt_ms = elapsed(next.timestamp, bin.timestamp).as_millis() as f64;
            let rate = delta * (MS_PER_HOUR / dt_ms);

            acc = if total >= 0.0 && rate >= RAPID_RATE {
                let total = total + delta;
                if total >= RAPID_TOTAL {
                    return PressureTrend::Rising;
                }
                Some(total)
            } else if total <= 0.0 && rate <= -RAPID_RATE {
                let total = total + delta;
                if total <= -RAPID_TOTAL {
                    return PressureTrend::Falling;
                }
                Some(total)
            } else {
                None
            };
        }
        newer = Some(bin);

        min = min.min(bin.pressure_hpa);
        max = max.max(bin.pressure_hpa);
        sum += bin.pressure_hpa;
        count += 1;
    }

    if count == 0 {
        return PressureTrend::Steady;
    }

    let avg = sum / f64::from(count);
    if min <= avg - UNSTEADY_SPREAD || max >= avg + UNSTEADY_SPREAD {
        PressureTrend::Unsteady
    } else {
        PressureTrend::Steady
    }
}

/// Binned pressure history and the bin currently being filled.
pub(crate) struct PressureHistory {
    bins: Deque<TrendBin, MAX_TREND_BINS>,
    sum: f64,
    count: u32,
    last_accepted: Option<Instant>,
    trend: PressureTrend,
    bin_interval: Duration,
    trend_window: Duration,
}

impl PressureHistory {
    pub const fn new(bin_interval: Duration, trend_window: Duration) -> Self {
        Self {
            bins: Deque::new(),
            sum: 0.0,
            count: 0,
            last_accepted: None,
            trend: PressureTrend::Steady,
            bin_interval,
            trend_window,
        }
    }

    /// Record a reading taken at `now` and return the current trend.
    ///
    /// If nothing was recorded for longer than one bin interval the history
    /// is discarded first, so data from before a gap never mixes with data
    /// after it.
    pub fn record(&mut self, now: Instant, pressure_hpa: f64) -> PressureTrend {
        let stale = self
            .last_accepted
            .map_or(true, |last| elapsed(now, last) > self.bin_interval);

        if stale {
            #[cfg(feature = "defmt")]
            defmt::info!("Pressure history reset, discarding {} bins", self.bins.len());

            self.bins.clear();
            self.sum = 0.0;
            self.count = 0;
        }

        self.last_accepted = Some(now);
        self.sum += pressure_hpa;
        self.count += 1;

        let due = self
            .bins
            .back()
            .map_or(true, |bin| elapsed(now, bin.timestamp) >= self.bin_interval);

        if due {
            self.close_bin(now);
        }

        self.trend
    }

    fn close_bin(&mut self, now: Instant) {
        let bin = TrendBin {
            timestamp: now,
            pressure_hpa: self.sum / f64::from(self.count),
        };
        self.sum = 0.0;
        self.count = 0;

        while let Some(oldest) = self.bins.front() {
            if elapsed(now, oldest.timestamp) < self.trend_window {
                break;
            }
            self.bins.pop_front();
        }

        if push_evicting(&mut self.bins, bin).is_some() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Trend window holds more than {} bins, evicted oldest", MAX_TREND_BINS);
        }

        self.trend = classify(self.bins.iter());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Closed pressure bin {} hPa, {} bins, trend {}",
            bin.pressure_hpa,
            self.bins.len(),
            self.trend
        );
    }

    pub fn bins(&self) -> impl DoubleEndedIterator<Item = &TrendBin> {
        self.bins.iter()
    }
}
