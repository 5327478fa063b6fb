//! Message bus topics and payloads for [`Update`]s.
//!
//! Payloads are compact JSON (plain text for the temperature) written into a
//! fixed-capacity string, so they can be handed to an MQTT client on a
//! microcontroller without allocating.

use core::fmt::{self, Write};

use crate::{PressureTrend, Update};

pub const WIND_TOPIC: &str = "meteo/wind";
pub const AIR_PRESSURE_TOPIC: &str = "meteo/air/press";
pub const AIR_TEMPERATURE_TOPIC: &str = "meteo/air/temp";

/// Large enough for any payload this module produces.
pub const PAYLOAD_CAPACITY: usize = 64;

pub type Payload = heapless::String<PAYLOAD_CAPACITY>;

impl PressureTrend {
    /// Single-letter code used in the pressure payload.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Steady => 's',
            Self::Unsteady => 'u',
            Self::Rising => 'r',
            Self::Falling => 'f',
        }
    }
}

impl Update {
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::Wind(_) => WIND_TOPIC,
            Self::AirTemperature(_) => AIR_TEMPERATURE_TOPIC,
            Self::AirPressure(_) => AIR_PRESSURE_TOPIC,
        }
    }

    /// Write the payload for [`Update::topic`].
    pub fn write_payload<W: Write>(&self, w: &mut W) -> fmt::Result {
        match self {
            Self::Wind(wind) => write!(
                w,
                r#"{{"d":{:.1},"da":{:.1},"s":{:.1},"sp":{:.1}}}"#,
                wind.direction_deg, wind.average_direction_deg, wind.speed_kn, wind.peak_speed_kn
            ),
            Self::AirTemperature(temp) => write!(w, "{:.2}", temp.temperature_c),
            Self::AirPressure(press) => write!(
                w,
                r#"{{"p":{:.2},"t":"{}"}}"#,
                press.pressure_hpa,
                press.trend.code()
            ),
        }
    }

    /// The payload for [`Update::topic`]. Fails only if a value is far
    /// outside anything a sensor can report.
    pub fn payload(&self) -> Result<Payload, fmt::Error> {
        let mut payload = Payload::new();
        self.write_payload(&mut payload)?;
        Ok(payload)
    }
}
