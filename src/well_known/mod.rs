//! The PGNs a weather station listens to, and the lookup tables they share.
//!
//! Field layouts follow [the Canboat project's PGN documentation](https://canboat.github.io/canboat/canboat.html).
//! Only the leading, fixed part of each PGN is decoded.

mod environment;
mod pressure;
mod temperature;
mod wind;

pub use environment::EnvironmentalParameters;
pub use pressure::ActualPressure;
pub use temperature::Temperature;
pub use wind::WindData;

/// Reference frame of a wind reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WindReference {
    GeoNorth = 0,
    MagNorth = 1,
    Apparent = 2,
    Boat = 3,
    Water = 4,
}

impl TryFrom<u8> for WindReference {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::GeoNorth,
            1 => Self::MagNorth,
            2 => Self::Apparent,
            3 => Self::Boat,
            4 => Self::Water,
            other => return Err(other),
        })
    }
}

/// Where a temperature was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TemperatureSource {
    Sea = 0,
    Outside = 1,
    Inside = 2,
    EngineRoom = 3,
    MainCabin = 4,
    LiveWell = 5,
    BaitWell = 6,
    Refrigeration = 7,
    HeatingSystem = 8,
    DewPoint = 9,
    ApparentWindChill = 10,
    TheoreticalWindChill = 11,
    HeatIndex = 12,
    Freezer = 13,
    ExhaustGas = 14,
}

impl TryFrom<u8> for TemperatureSource {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Sea,
            1 => Self::Outside,
            2 => Self::Inside,
            3 => Self::EngineRoom,
            4 => Self::MainCabin,
            5 => Self::LiveWell,
            6 => Self::BaitWell,
            7 => Self::Refrigeration,
            8 => Self::HeatingSystem,
            9 => Self::DewPoint,
            10 => Self::ApparentWindChill,
            11 => Self::TheoreticalWindChill,
            12 => Self::HeatIndex,
            13 => Self::Freezer,
            14 => Self::ExhaustGas,
            other => return Err(other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HumiditySource {
    Inside = 0,
    Outside = 1,
}

impl TryFrom<u8> for HumiditySource {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inside),
            1 => Ok(Self::Outside),
            other => Err(other),
        }
    }
}

/// What a pressure transducer is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PressureSource {
    Atmospheric = 0,
    Water = 1,
    Steam = 2,
    CompressedAir = 3,
    Hydraulic = 4,
}

impl TryFrom<u8> for PressureSource {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Atmospheric,
            1 => Self::Water,
            2 => Self::Steam,
            3 => Self::CompressedAir,
            4 => Self::Hydraulic,
            other => return Err(other),
        })
    }
}
