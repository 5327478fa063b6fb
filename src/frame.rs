use embedded_can::ExtendedId;

use crate::Id;

/// A CAN frame as delivered by the bus, before any N2K interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    pub is_extended: bool,
    pub is_remote: bool,
    pub is_error: bool,
    pub arbitration_id: u32,
    pub data: heapless::Vec<u8, 8>,
}

impl RawFrame {
    /// An extended data frame. Returns `None` if `data` is longer than 8
    /// bytes.
    pub fn extended(arbitration_id: u32, data: &[u8]) -> Option<Self> {
        Some(Self {
            is_extended: true,
            is_remote: false,
            is_error: false,
            arbitration_id,
            data: heapless::Vec::from_slice(data).ok()?,
        })
    }

    /// The N2K identifier, if this is an extended frame. Bits above the
    /// 29-bit ID, such as SocketCAN's flag bits, are ignored.
    #[must_use]
    pub fn id(&self) -> Option<Id> {
        if !self.is_extended {
            return None;
        }

        ExtendedId::new(self.arbitration_id & ExtendedId::MAX.as_raw()).map(Id::from_can_id)
    }
}

impl<F: embedded_can::Frame> From<&F> for RawFrame {
    /// `embedded-can` has no notion of error frames, so these are always
    /// data or remote frames.
    fn from(frame: &F) -> Self {
        let (is_extended, arbitration_id) = match frame.id() {
            embedded_can::Id::Extended(id) => (true, id.as_raw()),
            embedded_can::Id::Standard(id) => (false, u32::from(id.as_raw())),
        };

        Self {
            is_extended,
            is_remote: frame.is_remote_frame(),
            is_error: false,
            arbitration_id,
            data: frame.data().iter().take(8).copied().collect(),
        }
    }
}
