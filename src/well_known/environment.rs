use generic_array::{typenum, GenericArray};

use super::{HumiditySource, TemperatureSource};
use crate::{Buf, DecodeError, Message};

/// PGN 130311, Environmental Parameters.
///
/// Unlike the other PGNs, an unknown source does not reject the message. The
/// source becomes `None` and the value it qualifies reads as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnvironmentalParameters {
    pub sequence_id: u8,
    pub temperature_source: Option<TemperatureSource>,
    pub temperature_c: f64,
    pub humidity_source: Option<HumiditySource>,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
}

impl Message for EnvironmentalParameters {
    const PGN: u32 = 130_311;

    type EncodedLen = typenum::U8;

    type DecodeError = DecodeError;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut buf = data.as_slice();

        let sequence_id = buf.get_u8()?;
        let sources = buf.get_u8()?;
        let temperature = buf.get_celsius()?;
        let humidity = f64::from(buf.get_u16()?) * 0.004;
        let pressure = f64::from(buf.get_u16()?);

        let temperature_source = TemperatureSource::try_from(sources & 0x3f).ok();
        let humidity_source = HumiditySource::try_from(sources >> 6).ok();

        Ok(Self {
            sequence_id,
            temperature_source,
            temperature_c: if temperature_source.is_some() { temperature } else { 0.0 },
            humidity_source,
            humidity_pct: if humidity_source.is_some() { humidity } else { 0.0 },
            pressure_hpa: pressure,
        })
    }
}
