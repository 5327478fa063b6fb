/// Returned when a read runs past the end of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Truncated;

/// Little-endian field reader over an N2K payload. Every read consumes the
/// bytes it returns.
pub trait Buf {
    fn get_u8(&mut self) -> Result<u8, Truncated>;

    fn get_u16(&mut self) -> Result<u16, Truncated>;

    fn get_i16(&mut self) -> Result<i16, Truncated>;

    fn get_u32(&mut self) -> Result<u32, Truncated>;

    /// Get a temperature in degrees Celsius from its 2-byte representation
    /// in units of 0.01 K.
    ///
    /// ```
    /// # use n2k_meteo::Buf;
    /// let mut buf = &[0x83, 0x72][..];
    /// let t = buf.get_celsius().unwrap();
    /// assert!((t - 20.0).abs() < 1e-9);
    /// ```
    #[inline]
    fn get_celsius(&mut self) -> Result<f64, Truncated> {
        Ok(f64::from(self.get_u16()?) * 0.01 + crate::KELVIN_OFFSET)
    }
}

impl Buf for &[u8] {
    #[inline]
    fn get_u8(&mut self) -> Result<u8, Truncated> {
        let (first, rest) = self.split_first().ok_or(Truncated)?;
        *self = rest;
        Ok(*first)
    }

    #[inline]
    fn get_u16(&mut self) -> Result<u16, Truncated> {
        let (bytes, rest) = self.split_first_chunk::<2>().ok_or(Truncated)?;
        *self = rest;
        Ok(u16::from_le_bytes(*bytes))
    }

    #[inline]
    fn get_i16(&mut self) -> Result<i16, Truncated> {
        self.get_u16().map(|v| v as i16)
    }

    #[inline]
    fn get_u32(&mut self) -> Result<u32, Truncated> {
        let (bytes, rest) = self.split_first_chunk::<4>().ok_or(Truncated)?;
        *self = rest;
        Ok(u32::from_le_bytes(*bytes))
    }
}
