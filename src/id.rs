use embedded_can::ExtendedId;

/// A NMEA 2000 message identifier. According to N2K specification, this is a
/// 29-bit extended CAN ID with a 3-bit priority, a 18-bit parameter group
/// number (PGN), and an 8-bit source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(ExtendedId);

impl Id {
    /// Build a broadcast (PDU2) identifier. Returns `None` if the fields do
    /// not fit into 29 bits.
    #[inline]
    #[must_use]
    pub fn new(priority: u8, pgn: u32, source: u8) -> Option<Self> {
        debug_assert!(priority <= 7, "Priority must be in the range 0-7");
        debug_assert!(pgn <= 0x3ffff, "PGN must be less than 0x3ffff (18 bits)");

        // The priority is in bits 26-28, the PGN in bits 8-25, and the source
        // address in bits 0-7.
        let raw = (priority as u32 & 0x7) << 26 | (pgn & 0x3ffff) << 8 | source as u32;
        ExtendedId::new(raw).map(Self)
    }

    /// Create a new identifier from an extended CAN ID.
    #[inline]
    #[must_use]
    pub const fn from_can_id(can_id: ExtendedId) -> Self {
        Self(can_id)
    }

    #[inline]
    #[must_use]
    pub const fn as_can_id(self) -> ExtendedId {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn as_raw(self) -> u32 {
        self.0.as_raw()
    }

    #[inline]
    #[must_use]
    pub fn priority(self) -> u8 {
        (self.0.as_raw() >> 26) as u8 & 0x7
    }

    /// The parameter group number. All PGNs handled by this crate are PDU2
    /// (broadcast), so the full 18 bits are taken without masking out a
    /// destination address.
    #[inline]
    #[must_use]
    pub fn pgn(self) -> u32 {
        (self.0.as_raw() >> 8) & 0x3ffff
    }

    #[inline]
    #[must_use]
    pub fn source(self) -> u8 {
        self.0.as_raw() as u8
    }
}

impl From<ExtendedId> for Id {
    fn from(id: ExtendedId) -> Self {
        Self::from_can_id(id)
    }
}

impl From<Id> for embedded_can::Id {
    fn from(id: Id) -> Self {
        Self::Extended(id.as_can_id())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Id {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Id({:x})", self.0.as_raw())
    }
}
