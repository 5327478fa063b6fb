//! Aggregation of decoded readings into the values a weather display shows.
//!
//! A [`Collector`] is fed one [`Event`] at a time, in bus order, and stamps
//! each with its own [`Clock`]. Every handler runs to completion and reports
//! which category changed, if any; the matching snapshot accessor then
//! returns a consistent view as of that update.

mod config;
mod trend;
mod wind;

use embassy_time::Instant;
use heapless::Deque;

pub use config::{Calibration, Config, AVERAGING_WINDOW, BIN_INTERVAL, TREND_WINDOW};
pub use trend::{classify, PressureTrend, TrendBin, MAX_TREND_BINS};

use trend::PressureHistory;
use wind::{WindSample, WindWindow};

use crate::{
    decode,
    well_known::{ActualPressure, PressureSource, Temperature, TemperatureSource, WindData},
    Clock, Event, MonotonicClock, RawFrame,
};

/// Conversion factor from metres per second to knots.
pub const KNOTS_PER_M_S: f64 = 1.943_844_5;

/// Default capacity of the wind sample window. Wind data is commonly sent at
/// 10 Hz, which fills the averaging window with 3000 samples. Faster sensors
/// effectively shorten the window once it is full.
pub const DEFAULT_WIND_CAPACITY: usize = 4096;

/// Which published value a handler updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Changed {
    Wind,
    AirTemperature,
    AirPressure,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindSnapshot {
    /// Latest direction in degrees, -180 to 180.
    pub direction_deg: f64,
    /// Speed-weighted mean direction over the averaging window, in degrees.
    pub average_direction_deg: f64,
    pub speed_kn: f64,
    /// Highest speed within the averaging window.
    pub peak_speed_kn: f64,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSnapshot {
    pub temperature_c: f64,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureSnapshot {
    /// Latest reading with the calibration offset applied. Not averaged.
    pub pressure_hpa: f64,
    pub trend: PressureTrend,
    pub timestamp: Instant,
}

/// A copy of the snapshot for one [`Changed`] category.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Update {
    Wind(WindSnapshot),
    AirTemperature(TemperatureSnapshot),
    AirPressure(PressureSnapshot),
}

impl Update {
    #[must_use]
    pub fn changed(&self) -> Changed {
        match self {
            Self::Wind(_) => Changed::Wind,
            Self::AirTemperature(_) => Changed::AirTemperature,
            Self::AirPressure(_) => Changed::AirPressure,
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> Instant {
        match self {
            Self::Wind(w) => w.timestamp,
            Self::AirTemperature(t) => t.timestamp,
            Self::AirPressure(p) => p.timestamp,
        }
    }
}

/// Stateful consumer of decoded readings. See the [module-level
/// documentation](self) for more information.
///
/// `N` bounds the number of wind samples kept in the averaging window.
pub struct Collector<K = MonotonicClock, const N: usize = DEFAULT_WIND_CAPACITY> {
    clock: K,
    /// Radians.
    wind_direction_offset: f64,
    pressure_offset: f64,
    wind_window: WindWindow<N>,
    pressure_history: PressureHistory,
    wind: Option<WindSnapshot>,
    air_temperature: Option<TemperatureSnapshot>,
    air_pressure: Option<PressureSnapshot>,
}

impl Collector {
    /// A collector on the system's monotonic clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<K, const N: usize> Collector<K, N>
where
    K: Clock,
{
    pub fn with_clock(config: Config, clock: K) -> Self {
        Self {
            clock,
            wind_direction_offset: config.calibration.wind_direction_offset_deg.to_radians(),
            pressure_offset: config.calibration.pressure_offset_hpa,
            wind_window: WindWindow::new(config.averaging_window),
            pressure_history: PressureHistory::new(config.bin_interval, config.trend_window),
            wind: None,
            air_temperature: None,
            air_pressure: None,
        }
    }

    /// Decode a frame and handle the resulting event, if any.
    pub fn on_frame(&mut self, frame: &RawFrame) -> Option<Changed> {
        decode(frame).and_then(|event| self.handle(&event))
    }

    pub fn handle(&mut self, event: &Event) -> Option<Changed> {
        match event {
            Event::Wind(wind) => Some(self.on_wind(wind)),
            Event::Temperature(temp) => self.on_temperature(temp),
            Event::Pressure(press) => self.on_pressure(press),
            Event::Environment(_) => None,
        }
    }

    /// Wind of any reference is accepted.
    pub fn on_wind(&mut self, wind: &WindData) -> Changed {
        let now = self.clock.now();
        let sample = WindSample::new(
            now,
            wind.direction_rad + self.wind_direction_offset,
            wind.speed_m_s,
        );
        let summary = self.wind_window.push(sample);

        self.wind = Some(WindSnapshot {
            direction_deg: sample.direction_deg(),
            average_direction_deg: summary.average_direction_deg(),
            speed_kn: sample.speed_m_s * KNOTS_PER_M_S,
            peak_speed_kn: summary.peak_m_s * KNOTS_PER_M_S,
            timestamp: now,
        });

        Changed::Wind
    }

    /// Only the outside temperature is published; other sources are
    /// ignored.
    pub fn on_temperature(&mut self, temp: &Temperature) -> Option<Changed> {
        if temp.source != TemperatureSource::Outside {
            return None;
        }

        self.air_temperature = Some(TemperatureSnapshot {
            temperature_c: temp.temperature_c,
            timestamp: self.clock.now(),
        });

        Some(Changed::AirTemperature)
    }

    /// Only atmospheric pressure is published; other sources are ignored.
    pub fn on_pressure(&mut self, press: &ActualPressure) -> Option<Changed> {
        if press.source != PressureSource::Atmospheric {
            return None;
        }

        let now = self.clock.now();
        let pressure_hpa = press.pressure_hpa + self.pressure_offset;
        let trend = self.pressure_history.record(now, pressure_hpa);

        self.air_pressure = Some(PressureSnapshot {
            pressure_hpa,
            trend,
            timestamp: now,
        });

        Some(Changed::AirPressure)
    }

    /// `None` until the first wind reading.
    #[must_use]
    pub fn wind(&self) -> Option<WindSnapshot> {
        self.wind
    }

    /// `None` until the first outside temperature reading.
    #[must_use]
    pub fn air_temperature(&self) -> Option<TemperatureSnapshot> {
        self.air_temperature
    }

    /// `None` until the first atmospheric pressure reading.
    #[must_use]
    pub fn air_pressure(&self) -> Option<PressureSnapshot> {
        self.air_pressure
    }

    /// The latest snapshot for a category.
    #[must_use]
    pub fn update(&self, changed: Changed) -> Option<Update> {
        match changed {
            Changed::Wind => self.wind.map(Update::Wind),
            Changed::AirTemperature => self.air_temperature.map(Update::AirTemperature),
            Changed::AirPressure => self.air_pressure.map(Update::AirPressure),
        }
    }

    /// Closed pressure bins in the trend window, oldest first.
    pub fn trend_bins(&self) -> impl DoubleEndedIterator<Item = &TrendBin> {
        self.pressure_history.bins()
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }
}

/// Append to a bounded queue, making room by dropping the oldest element.
/// Returns the dropped element.
fn push_evicting<T, const N: usize>(queue: &mut Deque<T, N>, item: T) -> Option<T> {
    let evicted = if queue.is_full() {
        queue.pop_front()
    } else {
        None
    };

    // a slot is free unless N is 0, where nothing can be kept anyway
    let _ = queue.push_back(item);

    evicted
}

#[cfg(test)]
mod tests {
    use embassy_time::{Duration, Instant};

    use super::{Calibration, Changed, Collector, Config, PressureTrend, Update, KNOTS_PER_M_S};
    use crate::{
        well_known::{
            ActualPressure, PressureSource, Temperature, TemperatureSource, WindData, WindReference,
        },
        Clock, Event, ReplayClock,
    };

    fn wind(direction_deg: f64, speed_kn: f64) -> WindData {
        WindData {
            sequence_id: 0,
            reference: WindReference::Apparent,
            speed_m_s: speed_kn / KNOTS_PER_M_S,
            direction_rad: direction_deg.to_radians(),
        }
    }

    fn pressure(source: PressureSource, pressure_hpa: f64) -> ActualPressure {
        ActualPressure {
            sequence_id: 0,
            instance: 0,
            source,
            pressure_hpa,
        }
    }

    fn temperature(source: TemperatureSource, temperature_c: f64) -> Temperature {
        Temperature {
            sequence_id: 0,
            instance: 0,
            source,
            temperature_c,
            setpoint_c: 0.0,
        }
    }

    #[test]
    fn nothing_published_initially() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        assert_eq!(collector.wind(), None);
        assert_eq!(collector.air_temperature(), None);
        assert_eq!(collector.air_pressure(), None);
        assert_eq!(collector.update(Changed::Wind), None);
    }

    #[test]
    fn wind_average_over_window() {
        let clock = ReplayClock::new(Instant::from_secs(1_000));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        // aged out by the time the rest arrives
        collector.on_wind(&wind(180.0, 30.0));

        clock.advance(Duration::from_secs(301));
        collector.on_wind(&wind(0.0, 10.0));
        clock.advance(Duration::from_secs(60));
        collector.on_wind(&wind(90.0, 10.0));
        clock.advance(Duration::from_secs(60));
        assert_eq!(collector.on_wind(&wind(0.0, 10.0)), Changed::Wind);

        let snapshot = collector.wind().unwrap();
        let expected = libm::atan2(1.0, 2.0).to_degrees();
        assert!((snapshot.average_direction_deg - expected).abs() < 1e-9);
        assert!(snapshot.direction_deg.abs() < 1e-9);
        assert!((snapshot.speed_kn - 10.0).abs() < 1e-9);
        assert!((snapshot.peak_speed_kn - 10.0).abs() < 1e-9);
        assert_eq!(snapshot.timestamp, Instant::from_secs(1_421));
    }

    #[test]
    fn gust_stays_peak_at_ten_hertz() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        collector.on_wind(&wind(0.0, 40.0));
        for _ in 0..1200 {
            clock.advance(Duration::from_millis(100));
            collector.on_wind(&wind(0.0, 10.0));
        }

        assert_eq!(collector.clock().now(), Instant::from_secs(120));
        let snapshot = collector.wind().unwrap();
        assert!((snapshot.peak_speed_kn - 40.0).abs() < 1e-9);
        assert!((snapshot.speed_kn - 10.0).abs() < 1e-9);
    }

    #[test]
    fn direction_offset_applies_in_degrees() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let config = Config::default().with_calibration(Calibration {
            wind_direction_offset_deg: 15.0,
            pressure_offset_hpa: 0.0,
        });
        let mut collector: Collector<_> = Collector::with_clock(config, &clock);

        collector.on_wind(&wind(170.0, 5.0));

        let snapshot = collector.wind().unwrap();
        assert!((snapshot.direction_deg + 175.0).abs() < 1e-9);
        assert!((snapshot.average_direction_deg + 175.0).abs() < 1e-9);
    }

    #[test]
    fn calm_reports_zero_average() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        collector.on_wind(&wind(120.0, 0.0));

        let snapshot = collector.wind().unwrap();
        assert_eq!(snapshot.average_direction_deg, 0.0);
        assert!((snapshot.direction_deg - 120.0).abs() < 1e-9);
        assert_eq!(snapshot.peak_speed_kn, 0.0);
    }

    #[test]
    fn only_outside_temperature() {
        let clock = ReplayClock::new(Instant::from_secs(42));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        let sea = Event::Temperature(temperature(TemperatureSource::Sea, 14.0));
        assert_eq!(collector.handle(&sea), None);
        assert_eq!(collector.air_temperature(), None);

        let outside = Event::Temperature(temperature(TemperatureSource::Outside, 21.5));
        assert_eq!(collector.handle(&outside), Some(Changed::AirTemperature));

        let snapshot = collector.air_temperature().unwrap();
        assert_eq!(snapshot.temperature_c, 21.5);
        assert_eq!(snapshot.timestamp, Instant::from_secs(42));
    }

    #[test]
    fn only_atmospheric_pressure_with_offset() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let config = Config::default().with_calibration(Calibration {
            wind_direction_offset_deg: 0.0,
            pressure_offset_hpa: 2.5,
        });
        let mut collector: Collector<_> = Collector::with_clock(config, &clock);

        let water = Event::Pressure(pressure(PressureSource::Water, 2000.0));
        assert_eq!(collector.handle(&water), None);

        let air = Event::Pressure(pressure(PressureSource::Atmospheric, 1010.0));
        assert_eq!(collector.handle(&air), Some(Changed::AirPressure));

        let snapshot = collector.air_pressure().unwrap();
        assert_eq!(snapshot.pressure_hpa, 1012.5);
        assert_eq!(snapshot.trend, PressureTrend::Steady);
        assert_eq!(collector.trend_bins().count(), 1);
    }

    #[test]
    fn published_pressure_is_not_averaged() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        collector.on_pressure(&pressure(PressureSource::Atmospheric, 1010.0));
        clock.advance(Duration::from_secs(60));
        collector.on_pressure(&pressure(PressureSource::Atmospheric, 1011.0));

        assert_eq!(collector.air_pressure().unwrap().pressure_hpa, 1011.0);
        assert_eq!(collector.trend_bins().count(), 1);
    }

    #[test]
    fn gap_restarts_trend_history() {
        let clock = ReplayClock::new(Instant::from_secs(0));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        for p in [1013.0, 1012.75, 1012.5, 1012.25] {
            collector.on_pressure(&pressure(PressureSource::Atmospheric, p));
            clock.advance(Duration::from_secs(300));
        }
        assert_eq!(collector.air_pressure().unwrap().trend, PressureTrend::Falling);
        assert_eq!(collector.trend_bins().count(), 4);

        // readings stop for 6 minutes in total
        clock.advance(Duration::from_secs(60));
        collector.on_pressure(&pressure(PressureSource::Atmospheric, 1012.0));

        let bins: Vec<_> = collector.trend_bins().map(|b| b.pressure_hpa).collect();
        assert_eq!(bins, [1012.0]);
        assert_eq!(collector.air_pressure().unwrap().trend, PressureTrend::Steady);
    }

    #[test]
    fn environmental_parameters_are_ignored() {
        use crate::well_known::EnvironmentalParameters;

        let clock = ReplayClock::new(Instant::from_secs(0));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        let env = Event::Environment(EnvironmentalParameters {
            sequence_id: 0,
            temperature_source: Some(TemperatureSource::Outside),
            temperature_c: 20.0,
            humidity_source: None,
            humidity_pct: 0.0,
            pressure_hpa: 1013.0,
        });

        assert_eq!(collector.handle(&env), None);
        assert_eq!(collector.air_temperature(), None);
    }

    #[test]
    fn update_matches_snapshot() {
        let clock = ReplayClock::new(Instant::from_secs(7));
        let mut collector: Collector<_> = Collector::with_clock(Config::default(), &clock);

        let changed = collector.on_wind(&wind(45.0, 12.0));
        let update = collector.update(changed).unwrap();

        assert_eq!(update, Update::Wind(collector.wind().unwrap()));
        assert_eq!(update.changed(), Changed::Wind);
        assert_eq!(update.timestamp(), Instant::from_secs(7));
    }
}
