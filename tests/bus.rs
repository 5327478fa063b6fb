#![allow(dead_code)]

use std::collections::VecDeque;

use embassy_time::Instant;
use embedded_can::{ExtendedId, Id, StandardId};
use n2k_meteo::{station::FrameSource, ReplayClock};

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    id: Id,
    is_remote: bool,
    dlc: usize,
    data: [u8; 8],
}

impl embedded_can::Frame for Frame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None; // Data length exceeds CAN frame limit
        }

        let mut d = [0; 8];
        d[..data.len()].copy_from_slice(data);

        Some(Self {
            id: id.into(),
            is_remote: false,
            dlc: data.len(),
            data: d,
        })
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.dlc]
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        Some(Self {
            id: id.into(),
            is_remote: true,
            dlc,
            data: [0; 8],
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.is_remote
    }

    fn id(&self) -> Id {
        self.id
    }
}

/// Returned once every recorded frame has been received.
#[derive(Debug, PartialEq, Eq)]
pub struct Exhausted;

/// A captured bus log. Receiving a frame moves the clock to the time it was
/// recorded at.
pub struct Recording<'a> {
    clock: &'a ReplayClock,
    frames: VecDeque<(Instant, Frame)>,
}

impl<'a> Recording<'a> {
    pub fn new(clock: &'a ReplayClock) -> Self {
        Self {
            clock,
            frames: VecDeque::new(),
        }
    }

    pub fn push(&mut self, at_secs: u64, frame: Frame) -> &mut Self {
        self.frames.push_back((Instant::from_secs(at_secs), frame));
        self
    }
}

impl FrameSource for Recording<'_> {
    type Error = Exhausted;

    type Frame = Frame;

    async fn receive(&mut self) -> Result<Self::Frame, Self::Error> {
        let (at, frame) = self.frames.pop_front().ok_or(Exhausted)?;
        self.clock.set(at);
        Ok(frame)
    }
}

fn n2k(pgn: u32, data: &[u8]) -> Frame {
    let id = n2k_meteo::Id::new(2, pgn, 0x23).unwrap();
    embedded_can::Frame::new(id.as_can_id(), data).unwrap()
}

pub fn wind(speed_raw: u16, direction_raw: i16, reference: u8) -> Frame {
    let s = speed_raw.to_le_bytes();
    let d = direction_raw.to_le_bytes();
    n2k(130_306, &[0x00, s[0], s[1], d[0], d[1], reference, 0xff, 0xff])
}

pub fn temperature(source: u8, kelvin_raw: u16) -> Frame {
    let t = kelvin_raw.to_le_bytes();
    n2k(130_312, &[0x00, 0x00, source, t[0], t[1], 0xff, 0xff, 0xff])
}

pub fn pressure(source: u8, raw: u32) -> Frame {
    let p = raw.to_le_bytes();
    n2k(130_314, &[0x00, 0x00, source, p[0], p[1], p[2], p[3], 0xff])
}

pub fn unknown(pgn: u32) -> Frame {
    n2k(pgn, &[0; 8])
}

pub fn standard(data: &[u8]) -> Frame {
    embedded_can::Frame::new(StandardId::new(0x123).unwrap(), data).unwrap()
}

pub fn extended_raw(raw: u32, data: &[u8]) -> Frame {
    embedded_can::Frame::new(ExtendedId::new(raw).unwrap(), data).unwrap()
}
