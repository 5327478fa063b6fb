use generic_array::{typenum, GenericArray};

use super::WindReference;
use crate::{Buf, DecodeError, Message};

/// PGN 130306, Wind Data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindData {
    pub sequence_id: u8,
    pub reference: WindReference,
    pub speed_m_s: f64,
    pub direction_rad: f64,
}

impl Message for WindData {
    const PGN: u32 = 130_306;

    type EncodedLen = typenum::U6;

    type DecodeError = DecodeError;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut buf = data.as_slice();

        let sequence_id = buf.get_u8()?;
        let speed_raw = buf.get_u16()?;
        let direction_raw = buf.get_i16()?;
        let reference = buf.get_u8()? & 0x07;
        let reference =
            WindReference::try_from(reference).map_err(DecodeError::UnknownReference)?;

        Ok(Self {
            sequence_id,
            reference,
            speed_m_s: f64::from(speed_raw) * 0.01,
            direction_rad: f64::from(direction_raw) * 0.0001,
        })
    }
}
