use crate::error::Result;
use crate::order::{BitOrder, BitWidth, ByteOrder};
use byteorder::{ByteOrder as _, BE, LE};
use std::io::Read;

/// Bit-level input stream, the read-side dual of [crate::BitOutput].
///
/// Used to verify encoded output: a reader configured with the same bit and
/// byte order reads back the logical values a builder wrote. Bits are served
/// least-significant-first from a one-byte buffer; in [BitOrder::Msb0] mode
/// every fetched byte is bit-reversed, mirroring the write side.
///
/// Reads do not skip alignment padding on their own; call [Self::align] at
/// the points where the writer forced a partial-byte flush.
#[derive(Debug)]
pub struct BitInput<R: Read> {
    source: R,
    bit_order: BitOrder,
    byte_order: ByteOrder,
    bit_buffer: u8,
    bit_count: u8,
    bytes_read: u64,
}

impl<R: Read> BitInput<R> {
    pub fn new(source: R, byte_order: ByteOrder, bit_order: BitOrder) -> Self {
        Self {
            source,
            bit_order,
            byte_order,
            bit_buffer: 0,
            bit_count: 0,
            bytes_read: 0,
        }
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Number of bytes fetched from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn fetch(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.source.read_exact(&mut buf)?;
        self.bytes_read += 1;
        Ok(match self.bit_order {
            BitOrder::Lsb0 => buf[0],
            BitOrder::Msb0 => buf[0].reverse_bits(),
        })
    }

    /// Reads the next `width` bits as an unsigned value.
    pub fn read_bits(&mut self, width: BitWidth) -> Result<u8> {
        let mut value = 0u8;
        for position in 0..width.get() {
            if self.bit_count == 0 {
                self.bit_buffer = self.fetch()?;
                self.bit_count = 8;
            }
            value |= (self.bit_buffer & 1) << position;
            self.bit_buffer >>= 1;
            self.bit_count -= 1;
        }
        Ok(value)
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(BitWidth::Bits1)? != 0)
    }

    /// Discards the unread remainder of a partially consumed byte.
    pub fn align(&mut self) {
        self.bit_buffer = 0;
        self.bit_count = 0;
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        if self.bit_count == 0 {
            self.fetch()
        } else {
            self.read_bits(BitWidth::Bits8)
        }
    }

    /// Reads back a run of `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(count);
        for _ in 0..count {
            data.push(self.read_byte()?);
        }
        Ok(data)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let buf = [self.read_byte()?, self.read_byte()?];
        Ok(match self.byte_order {
            ByteOrder::BigEndian => BE::read_u16(&buf),
            ByteOrder::LittleEndian => LE::read_u16(&buf),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(match self.byte_order {
            ByteOrder::BigEndian => BE::read_u32(&buf),
            ByteOrder::LittleEndian => LE::read_u32(&buf),
        })
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(match self.byte_order {
            ByteOrder::BigEndian => BE::read_u64(&buf),
            ByteOrder::LittleEndian => LE::read_u64(&buf),
        })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_served_lsb_first() {
        let mut input = BitInput::new(&[0xEDu8][..], ByteOrder::BigEndian, BitOrder::Lsb0);
        assert_eq!(input.read_bits(BitWidth::Bits4).unwrap(), 0x0D);
        assert_eq!(input.read_bits(BitWidth::Bits4).unwrap(), 0x0E);
    }

    #[test]
    fn test_msb0_reverses_fetched_bytes() {
        let mut input = BitInput::new(&[0x80u8][..], ByteOrder::BigEndian, BitOrder::Msb0);
        assert!(input.read_bit().unwrap());
    }

    #[test]
    fn test_align_discards_partial_byte() {
        let mut input = BitInput::new(&[0x01u8, 0xFF][..], ByteOrder::BigEndian, BitOrder::Lsb0);
        assert!(input.read_bit().unwrap());
        input.align();
        assert_eq!(input.read_byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_eof_propagates() {
        let mut input = BitInput::new(&[][..], ByteOrder::BigEndian, BitOrder::Lsb0);
        assert!(input.read_byte().is_err());
    }
}
