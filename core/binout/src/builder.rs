use crate::error::{Error, Result};
use crate::order::{BinConfig, BitWidth, ByteOrder};
use crate::output::BitOutput;
use crate::sink::Sink;
use std::io::{self, Write};

/// Lifecycle of a builder. `Open` performs writes, `Stopped` silently ignores
/// everything except `end`, `Closed` rejects every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Stopped,
    Closed,
}

/// Fluent builder that assembles an exact byte stream from heterogeneous
/// primitive writes.
///
/// Every operation takes effect immediately, in program order, so a whole
/// message can be a single chain of `?`-propagated calls. A variable-content
/// hook (see [Self::var]) may stop the builder mid-chain: the remaining calls
/// of the same chain then become silent no-ops instead of errors.
///
/// Built over an internal buffer (returned by [Self::end]) or any external
/// [Write] sink (which the caller keeps and observes directly).
#[derive(Debug)]
pub struct BinBuilder<W: Write = io::Sink> {
    output: BitOutput<Sink<W>>,
    state: State,
}

impl BinBuilder {
    /// Builder over an internal buffer, big-endian, LSB0.
    pub fn new() -> Self {
        Self::with_config(BinConfig::default())
    }

    /// Builder over an internal buffer with the given orders.
    pub fn with_config(config: BinConfig) -> Self {
        Self::buffered(Vec::new(), config)
    }

    /// Builder over an internal buffer preallocated to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::buffered(Vec::with_capacity(capacity), BinConfig::default())
    }

    fn buffered(buffer: Vec<u8>, config: BinConfig) -> Self {
        Self {
            output: BitOutput::new(Sink::Buffer(buffer), config.byte_order, config.bit_order),
            state: State::Open,
        }
    }
}

impl Default for BinBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> BinBuilder<W> {
    /// Builder forwarding every produced byte to `writer`. [Self::end]
    /// returns `None`; the caller already owns the destination.
    pub fn from_writer(writer: W) -> Self {
        Self::from_writer_config(writer, BinConfig::default())
    }

    pub fn from_writer_config(writer: W, config: BinConfig) -> Self {
        Self {
            output: BitOutput::new(Sink::Stream(writer), config.byte_order, config.bit_order),
            state: State::Open,
        }
    }

    /// Adopts a caller-built bit stream, keeping its in-flight accumulator
    /// state. Fails with [Error::BitOrderConflict] when the requested bit
    /// order disagrees with the stream's own; bit-level state cannot be
    /// reconciled across that boundary. The configured byte order becomes the
    /// active one.
    pub fn from_bit_output(output: BitOutput<W>, config: BinConfig) -> Result<Self> {
        if output.bit_order() != config.bit_order {
            return Err(Error::BitOrderConflict {
                expected: config.bit_order,
                actual: output.bit_order(),
            });
        }
        let mut output = output.map_sink(Sink::Stream);
        output.set_byte_order(config.byte_order);
        Ok(Self {
            output,
            state: State::Open,
        })
    }

    /// Lifecycle check at the top of every operation. `Ok(true)` means
    /// perform the write, `Ok(false)` means the builder is stopped and the
    /// operation is a silent no-op.
    fn active(&self, operation: &'static str) -> Result<bool> {
        match self.state {
            State::Open => Ok(true),
            State::Stopped => Ok(false),
            State::Closed => Err(Error::AlreadyEnded(operation)),
        }
    }

    /// Direct access to the underlying bit stream, mainly for variable
    /// content hooks. Writes issued here bypass the lifecycle check.
    pub fn output(&mut self) -> &mut BitOutput<Sink<W>> {
        &mut self.output
    }

    /// Bytes fully committed to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.output.bytes_written()
    }

    /// Writes the low bit of `value`.
    pub fn bit(&mut self, value: u8) -> Result<&mut Self> {
        if self.active("bit")? {
            self.output.write_bit(value & 1 != 0)?;
        }
        Ok(self)
    }

    /// Writes the low bit of every value, in order.
    pub fn bit_array(&mut self, values: &[u8]) -> Result<&mut Self> {
        if self.active("bit_array")? {
            for &value in values {
                self.output.write_bit(value & 1 != 0)?;
            }
        }
        Ok(self)
    }

    /// Writes a boolean as a single bit, 1 for true.
    pub fn flag(&mut self, value: bool) -> Result<&mut Self> {
        if self.active("flag")? {
            self.output.write_bit(value)?;
        }
        Ok(self)
    }

    pub fn flag_array(&mut self, values: &[bool]) -> Result<&mut Self> {
        if self.active("flag_array")? {
            for &value in values {
                self.output.write_bit(value)?;
            }
        }
        Ok(self)
    }

    /// Packs the low `width` bits of `value` into the stream.
    pub fn bits(&mut self, width: BitWidth, value: u8) -> Result<&mut Self> {
        if self.active("bits")? {
            self.output.write_bits(width, value)?;
        }
        Ok(self)
    }

    /// Packs a fixed-width group for every value, concatenated in call order.
    pub fn bits_array(&mut self, width: BitWidth, values: &[u8]) -> Result<&mut Self> {
        if self.active("bits_array")? {
            for &value in values {
                self.output.write_bits(width, value)?;
            }
        }
        Ok(self)
    }

    pub fn byte(&mut self, value: u8) -> Result<&mut Self> {
        if self.active("byte")? {
            self.output.write_byte(value)?;
        }
        Ok(self)
    }

    pub fn byte_array(&mut self, values: &[u8]) -> Result<&mut Self> {
        if self.active("byte_array")? {
            self.output.write_bytes(values)?;
        }
        Ok(self)
    }

    /// Writes `text` one byte per UTF-16 code unit, low 8 bits kept.
    pub fn byte_text(&mut self, text: &str) -> Result<&mut Self> {
        if self.active("byte_text")? {
            self.output.write_text_raw(text)?;
        }
        Ok(self)
    }

    /// Writes `text` UTF-8 encoded.
    pub fn utf8(&mut self, text: &str) -> Result<&mut Self> {
        if self.active("utf8")? {
            self.output.write_utf8(text)?;
        }
        Ok(self)
    }

    pub fn short(&mut self, value: u16) -> Result<&mut Self> {
        if self.active("short")? {
            self.output.write_u16(value)?;
        }
        Ok(self)
    }

    pub fn short_array(&mut self, values: &[u16]) -> Result<&mut Self> {
        if self.active("short_array")? {
            for &value in values {
                self.output.write_u16(value)?;
            }
        }
        Ok(self)
    }

    pub fn int(&mut self, value: u32) -> Result<&mut Self> {
        if self.active("int")? {
            self.output.write_u32(value)?;
        }
        Ok(self)
    }

    pub fn int_array(&mut self, values: &[u32]) -> Result<&mut Self> {
        if self.active("int_array")? {
            for &value in values {
                self.output.write_u32(value)?;
            }
        }
        Ok(self)
    }

    pub fn long(&mut self, value: u64) -> Result<&mut Self> {
        if self.active("long")? {
            self.output.write_u64(value)?;
        }
        Ok(self)
    }

    pub fn long_array(&mut self, values: &[u64]) -> Result<&mut Self> {
        if self.active("long_array")? {
            for &value in values {
                self.output.write_u64(value)?;
            }
        }
        Ok(self)
    }

    pub fn float(&mut self, value: f32) -> Result<&mut Self> {
        if self.active("float")? {
            self.output.write_f32(value)?;
        }
        Ok(self)
    }

    pub fn float_array(&mut self, values: &[f32]) -> Result<&mut Self> {
        if self.active("float_array")? {
            for &value in values {
                self.output.write_f32(value)?;
            }
        }
        Ok(self)
    }

    pub fn double(&mut self, value: f64) -> Result<&mut Self> {
        if self.active("double")? {
            self.output.write_f64(value)?;
        }
        Ok(self)
    }

    pub fn double_array(&mut self, values: &[f64]) -> Result<&mut Self> {
        if self.active("double_array")? {
            for &value in values {
                self.output.write_f64(value)?;
            }
        }
        Ok(self)
    }

    /// Switches the byte order for writes issued after this call.
    pub fn byte_order(&mut self, byte_order: ByteOrder) -> Result<&mut Self> {
        if self.active("byte_order")? {
            self.output.set_byte_order(byte_order);
        }
        Ok(self)
    }

    /// Completes the current byte, zero-padding pending bits.
    pub fn align(&mut self) -> Result<&mut Self> {
        if self.active("align")? {
            self.output.align()?;
        }
        Ok(self)
    }

    /// Completes the current byte, then pads with zero bytes up to a multiple
    /// of `boundary` bytes written.
    pub fn align_to(&mut self, boundary: u64) -> Result<&mut Self> {
        if self.active("align_to")? {
            self.output.align_to(boundary)?;
        }
        Ok(self)
    }

    /// Completes the current byte, then writes `count` zero bytes.
    pub fn skip(&mut self, count: u64) -> Result<&mut Self> {
        if self.active("skip")? {
            self.output.skip(count)?;
        }
        Ok(self)
    }

    /// Commits pending bits and flushes the sink, letting an external sink
    /// observe everything produced so far before finalization.
    pub fn flush(&mut self) -> Result<&mut Self> {
        if self.active("flush")? {
            self.output.flush()?;
        }
        Ok(self)
    }

    /// Invokes a variable-content hook with the live builder. The hook may
    /// issue any writes, including nested hooks; its effects interleave at
    /// this exact point of the chain. Returning `Ok(false)` stops the
    /// builder: every later operation of the chain becomes a silent no-op
    /// until [Self::end]. Arguments travel by closure capture.
    pub fn var<F>(&mut self, hook: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<bool>,
    {
        if self.active("var")? && !hook(self)? {
            self.state = State::Stopped;
        }
        Ok(self)
    }

    /// Finalizes the builder. From `Open`, pending bits are committed and
    /// the sink flushed; from a stopped builder the result holds only bytes
    /// already committed. Returns the accumulated bytes for an internal
    /// buffer, `None` for an external sink. Every subsequent operation,
    /// including `end` itself, fails with [Error::AlreadyEnded].
    pub fn end(&mut self) -> Result<Option<Vec<u8>>> {
        let was_open = self.active("end")?;
        self.state = State::Closed;
        if was_open {
            self.output.flush()?;
        }
        Ok(match self.output.get_mut() {
            Sink::Buffer(buffer) => Some(std::mem::take(buffer)),
            Sink::Stream(_) => None,
        })
    }

    /// Recovers an external writer passed to [Self::from_writer]. `None` for
    /// internal-buffer builders.
    pub fn into_writer(self) -> Option<W> {
        match self.output.into_inner() {
            Sink::Stream(writer) => Some(writer),
            Sink::Buffer(_) => None,
        }
    }
}
