use generic_array::{typenum, GenericArray};

use super::TemperatureSource;
use crate::{Buf, DecodeError, Message};

/// PGN 130312, Temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    pub sequence_id: u8,
    pub instance: u8,
    pub source: TemperatureSource,
    pub temperature_c: f64,
    pub setpoint_c: f64,
}

impl Message for Temperature {
    const PGN: u32 = 130_312;

    type EncodedLen = typenum::U7;

    type DecodeError = DecodeError;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut buf = data.as_slice();

        let sequence_id = buf.get_u8()?;
        let instance = buf.get_u8()?;
        let source = buf.get_u8()?;
        let source = TemperatureSource::try_from(source).map_err(DecodeError::UnknownSource)?;

        Ok(Self {
            sequence_id,
            instance,
            source,
            temperature_c: buf.get_celsius()?,
            setpoint_c: buf.get_celsius()?,
        })
    }
}
