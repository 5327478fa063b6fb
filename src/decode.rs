#[cfg(feature = "defmt")]
use defmt::trace;

use crate::{
    well_known::{ActualPressure, EnvironmentalParameters, Temperature, WindData},
    Message, RawFrame, Truncated,
};

/// Why a recognized PGN did not produce a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    Truncated,
    UnknownReference(u8),
    UnknownSource(u8),
}

impl From<Truncated> for DecodeError {
    fn from(_: Truncated) -> Self {
        Self::Truncated
    }
}

/// A decoded sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Wind(WindData),
    Environment(EnvironmentalParameters),
    Temperature(Temperature),
    Pressure(ActualPressure),
}

/// Decode a single CAN frame.
///
/// Error frames, standard frames, unknown PGNs, short payloads and messages
/// with an unknown reference or source code all yield `None`. On a real bus
/// these are noise rather than faults.
#[must_use]
pub fn decode(frame: &RawFrame) -> Option<Event> {
    if frame.is_error {
        #[cfg(feature = "defmt")]
        trace!("Dropping error frame");
        return None;
    }

    let id = frame.id()?;

    match id.pgn() {
        WindData::PGN => decode_as(&frame.data).map(Event::Wind),
        EnvironmentalParameters::PGN => decode_as(&frame.data).map(Event::Environment),
        Temperature::PGN => decode_as(&frame.data).map(Event::Temperature),
        ActualPressure::PGN => decode_as(&frame.data).map(Event::Pressure),
        _ => None,
    }
}

fn decode_as<T>(data: &[u8]) -> Option<T>
where
    T: Message<DecodeError = DecodeError>,
{
    match T::from_payload(data) {
        Some(Ok(msg)) => Some(msg),
        Some(Err(_e)) => {
            #[cfg(feature = "defmt")]
            trace!("Dropping PGN {}: {}", T::PGN, _e);
            None
        }
        None => {
            #[cfg(feature = "defmt")]
            trace!("Dropping PGN {}: {} bytes is too short", T::PGN, data.len());
            None
        }
    }
}
