use crate::error::Result;
use crate::order::{BitOrder, BitWidth, ByteOrder};
use byteorder::{ByteOrder as _, BE, LE};
use std::io::Write;

/// Bit-level output stream over any [Write] sink.
///
/// Composes a sub-byte bit accumulator with a byte-order codec. Bits fill the
/// accumulator least-significant-position first; when a byte completes (or a
/// byte-oriented write forces a zero-padded flush) it passes through a single
/// emission point which bit-reverses the byte in [BitOrder::Msb0] mode.
///
/// Any byte-oriented write commits pending sub-byte bits first, zero-padded.
/// That keeps the stream a well-defined byte sequence at every byte boundary
/// at the cost of consuming a partially filled byte early.
#[derive(Debug)]
pub struct BitOutput<W: Write> {
    sink: W,
    bit_order: BitOrder,
    byte_order: ByteOrder,
    // Pending bits, always fewer than 8. A completed byte is emitted
    // immediately and the count resets to zero.
    bit_buffer: u8,
    bit_count: u8,
    bytes_written: u64,
}

impl<W: Write> BitOutput<W> {
    pub fn new(sink: W, byte_order: ByteOrder, bit_order: BitOrder) -> Self {
        Self {
            sink,
            bit_order,
            byte_order,
            bit_buffer: 0,
            bit_count: 0,
            bytes_written: 0,
        }
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Switches the byte order for subsequent multi-byte writes.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Number of bytes fully emitted to the sink. Pending sub-byte bits are
    /// not counted until they are flushed.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consumes the stream and returns the sink. Pending bits are dropped;
    /// call [Self::flush_bits] first to keep them.
    pub fn into_inner(self) -> W {
        self.sink
    }

    pub(crate) fn map_sink<V: Write>(self, wrap: impl FnOnce(W) -> V) -> BitOutput<V> {
        BitOutput {
            sink: wrap(self.sink),
            bit_order: self.bit_order,
            byte_order: self.byte_order,
            bit_buffer: self.bit_buffer,
            bit_count: self.bit_count,
            bytes_written: self.bytes_written,
        }
    }

    // The single byte emission point. Msb0 reverses every emitted byte, which
    // covers both accumulator-completed bytes and whole-byte writes.
    fn emit(&mut self, byte: u8) -> Result<()> {
        let encoded = match self.bit_order {
            BitOrder::Lsb0 => byte,
            BitOrder::Msb0 => byte.reverse_bits(),
        };
        self.sink.write_all(&[encoded])?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Appends the low `width` bits of `value` to the accumulator, emitting a
    /// completed byte when it fills.
    pub fn write_bits(&mut self, width: BitWidth, value: u8) -> Result<()> {
        let mut acc = value;
        for _ in 0..width.get() {
            self.bit_buffer |= (acc & 1) << self.bit_count;
            acc >>= 1;
            self.bit_count += 1;
            if self.bit_count == 8 {
                let full = self.bit_buffer;
                self.bit_buffer = 0;
                self.bit_count = 0;
                self.emit(full)?;
            }
        }
        Ok(())
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(BitWidth::Bits1, bit as u8)
    }

    /// Zero-pads and emits the pending partial byte, if any.
    pub fn flush_bits(&mut self) -> Result<()> {
        if self.bit_count > 0 {
            let partial = self.bit_buffer;
            self.bit_buffer = 0;
            self.bit_count = 0;
            self.emit(partial)?;
        }
        Ok(())
    }

    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.flush_bits()?;
        self.emit(value)
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.flush_bits()?;
        for &byte in data {
            self.emit(byte)?;
        }
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        let mut buf = [0u8; 2];
        match self.byte_order {
            ByteOrder::BigEndian => BE::write_u16(&mut buf, value),
            ByteOrder::LittleEndian => LE::write_u16(&mut buf, value),
        }
        self.write_bytes(&buf)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        let mut buf = [0u8; 4];
        match self.byte_order {
            ByteOrder::BigEndian => BE::write_u32(&mut buf, value),
            ByteOrder::LittleEndian => LE::write_u32(&mut buf, value),
        }
        self.write_bytes(&buf)
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        let mut buf = [0u8; 8];
        match self.byte_order {
            ByteOrder::BigEndian => BE::write_u64(&mut buf, value),
            ByteOrder::LittleEndian => LE::write_u64(&mut buf, value),
        }
        self.write_bytes(&buf)
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    pub fn write_utf8(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Writes one byte per UTF-16 code unit of `text`, keeping the low 8 bits.
    pub fn write_text_raw(&mut self, text: &str) -> Result<()> {
        self.flush_bits()?;
        for unit in text.encode_utf16() {
            self.emit(unit as u8)?;
        }
        Ok(())
    }

    /// Completes the current byte; equivalent to [Self::flush_bits].
    pub fn align(&mut self) -> Result<()> {
        self.flush_bits()
    }

    /// Completes the current byte, then emits zero bytes until the count of
    /// emitted bytes is a multiple of `boundary`. The flushed partial byte
    /// counts toward the alignment.
    pub fn align_to(&mut self, boundary: u64) -> Result<()> {
        self.flush_bits()?;
        if boundary > 1 {
            while self.bytes_written % boundary != 0 {
                self.emit(0)?;
            }
        }
        Ok(())
    }

    /// Completes the current byte, then emits exactly `count` zero bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.flush_bits()?;
        for _ in 0..count {
            self.emit(0)?;
        }
        Ok(())
    }

    /// Commits pending bits and flushes the sink so an external consumer can
    /// observe everything produced so far.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_bits()?;
        self.sink.flush()?;
        Ok(())
    }
}
