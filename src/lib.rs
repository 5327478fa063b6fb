//! This crate turns the NMEA 2000 (N2K) traffic of a boat's weather sensors
//! into values worth showing or publishing: wind direction and speed with a
//! trailing average and peak, outside air temperature, and barometric
//! pressure with a trend (steady, unsteady, rising or falling).
//!
//! It is split into two halves. [`decode`] is a pure function from a single
//! CAN frame to at most one [`Event`]. [`Collector`] consumes those events
//! and keeps the bounded, time-windowed state needed for the derived values.
//! Neither allocates on the heap, blocks or performs I/O, so the crate is
//! usable on microcontrollers as well as on a Linux box reading `can0`.
//!
//! With the `station` feature, [`station::Station`] wires the two together
//! behind an async frame source.

#![cfg_attr(not(test), no_std)]

mod buf;
pub mod collector;
mod decode;
mod frame;
mod id;
pub mod publish;
#[cfg(feature = "station")]
pub mod station;
pub mod time;
pub mod well_known;

use generic_array::{typenum::Unsigned, ArrayLength, GenericArray};

pub use buf::{Buf, Truncated};
pub use collector::{
    Calibration, Changed, Collector, Config, PressureSnapshot, PressureTrend, TemperatureSnapshot,
    Update, WindSnapshot,
};
pub use decode::{decode, DecodeError, Event};
pub use frame::RawFrame;
pub use generic_array::typenum;
pub use id::Id;
pub use time::{Clock, MonotonicClock, ReplayClock};

/// Offset between the kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = -273.15;

/// A single-frame NMEA 2000 message. This trait is very much inspired by
/// [the gRPC library Prost's trait with the same name](https://docs.rs/prost/latest/prost/trait.Message.html).
pub trait Message {
    const PGN: u32;

    /// Minimum payload length in bytes. Frames may carry trailing bytes
    /// beyond this, which are ignored.
    type EncodedLen: ArrayLength;

    /// The error type returned when a message fails to decode.
    type DecodeError;

    /// Decode a message from its encoded form.
    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError>
    where
        Self: Sized;

    /// Decode a message from a frame payload. Returns `None` if the payload
    /// is shorter than [`Message::EncodedLen`].
    fn from_payload(data: &[u8]) -> Option<Result<Self, Self::DecodeError>>
    where
        Self: Sized,
    {
        let data = data.get(..Self::EncodedLen::USIZE)?;
        let data = GenericArray::<u8, Self::EncodedLen>::try_from_slice(data).ok()?;
        Some(Self::decode(data))
    }
}
