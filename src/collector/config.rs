use embassy_time::Duration;

/// Trailing window for the average wind direction and the peak speed.
pub const AVERAGING_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Length of one pressure bin. Also the longest gap between pressure
/// readings that is bridged rather than treated as a restart.
pub const BIN_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Trailing window of pressure bins the trend is classified over.
pub const TREND_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Sensor mounting corrections, applied to every reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Added to every wind direction, in degrees.
    pub wind_direction_offset_deg: f64,
    /// Added to every atmospheric pressure, in hPa.
    pub pressure_offset_hpa: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub averaging_window: Duration,
    pub bin_interval: Duration,
    pub trend_window: Duration,
    pub calibration: Calibration,
}

impl Config {
    pub const DEFAULT: Self = Self {
        averaging_window: AVERAGING_WINDOW,
        bin_interval: BIN_INTERVAL,
        trend_window: TREND_WINDOW,
        calibration: Calibration {
            wind_direction_offset_deg: 0.0,
            pressure_offset_hpa: 0.0,
        },
    };

    #[must_use]
    pub const fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
