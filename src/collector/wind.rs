use embassy_time::{Duration, Instant};
use heapless::Deque;

use super::push_evicting;
use crate::time::elapsed;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WindSample {
    pub timestamp: Instant,
    pub dir_sin: f64,
    pub dir_cos: f64,
    pub speed_m_s: f64,
}

impl WindSample {
    pub fn new(timestamp: Instant, direction_rad: f64, speed_m_s: f64) -> Self {
        Self {
            timestamp,
            dir_sin: libm::sin(direction_rad),
            dir_cos: libm::cos(direction_rad),
            speed_m_s,
        }
    }

    /// Direction in degrees, in the range -180 to 180.
    pub fn direction_deg(&self) -> f64 {
        libm::atan2(self.dir_sin, self.dir_cos).to_degrees()
    }
}

/// Speed-weighted direction vector and peak speed over the averaging window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WindSummary {
    pub sin_sum: f64,
    pub cos_sum: f64,
    pub peak_m_s: f64,
}

impl WindSummary {
    /// Average direction in degrees. Calm windows average to 0.
    pub fn average_direction_deg(&self) -> f64 {
        libm::atan2(self.sin_sum, self.cos_sum).to_degrees()
    }
}

/// Trailing window of wind samples, at most `N` of them.
pub(crate) struct WindWindow<const N: usize> {
    samples: Deque<WindSample, N>,
    window: Duration,
}

impl<const N: usize> WindWindow<N> {
    pub const fn new(window: Duration) -> Self {
        Self {
            samples: Deque::new(),
            window,
        }
    }

    /// Drop samples that have aged out as of `sample`, append it and
    /// summarize what is left.
    pub fn push(&mut self, sample: WindSample) -> WindSummary {
        while let Some(oldest) = self.samples.front() {
            if elapsed(sample.timestamp, oldest.timestamp) < self.window {
                break;
            }
            self.samples.pop_front();
        }

        if push_evicting(&mut self.samples, sample).is_some() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Wind window full at {} samples, evicted oldest", N);
        }

        self.summarize()
    }

    fn summarize(&self) -> WindSummary {
        self.samples.iter().fold(
            WindSummary {
                sin_sum: 0.0,
                cos_sum: 0.0,
                peak_m_s: 0.0,
            },
            |acc, s| WindSummary {
                sin_sum: acc.sin_sum + s.dir_sin * s.speed_m_s,
                cos_sum: acc.cos_sum + s.dir_cos * s.speed_m_s,
                peak_m_s: if s.speed_m_s > acc.peak_m_s {
                    s.speed_m_s
                } else {
                    acc.peak_m_s
                },
            },
        )
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}
