use generic_array::{typenum, GenericArray};

use super::PressureSource;
use crate::{Buf, DecodeError, Message};

/// PGN 130314, Actual Pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActualPressure {
    pub sequence_id: u8,
    pub instance: u8,
    pub source: PressureSource,
    pub pressure_hpa: f64,
}

impl Message for ActualPressure {
    const PGN: u32 = 130_314;

    type EncodedLen = typenum::U7;

    type DecodeError = DecodeError;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut buf = data.as_slice();

        let sequence_id = buf.get_u8()?;
        let instance = buf.get_u8()?;
        let source = buf.get_u8()?;
        let source = PressureSource::try_from(source).map_err(DecodeError::UnknownSource)?;
        let pressure_raw = buf.get_u32()?;

        Ok(Self {
            sequence_id,
            instance,
            source,
            pressure_hpa: f64::from(pressure_raw) * 0.001,
        })
    }
}
