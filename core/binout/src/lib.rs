//! # binout
//!
//! Bit-precision binary output builder for protocol and file producers that
//! must emit byte-exact streams: single bits, sub-byte bit groups, bytes,
//! multi-byte integers, floats and strings, under configurable bit order
//! (LSB0/MSB0) and switchable byte order, with alignment padding and
//! skip-forward gaps.
//!
//! Output goes to an internal buffer or any [std::io::Write] sink. A
//! variable-content hook can emit caller-defined blocks and cooperatively
//! stop the rest of an already-written chain without raising errors.
//!
//! ```
//! use binout::{BinBuilder, BitWidth, ByteOrder};
//!
//! # fn main() -> binout::Result<()> {
//! let bytes = BinBuilder::new()
//!     .bits(BitWidth::Bits4, 0x0D)?
//!     .bits(BitWidth::Bits4, 0x0E)?
//!     .byte_order(ByteOrder::LittleEndian)?
//!     .int(0x01020304)?
//!     .end()?
//!     .expect("internal buffer");
//! assert_eq!(bytes, [0xED, 0x04, 0x03, 0x02, 0x01]);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod input;
mod order;
mod output;
mod sink;

pub use builder::BinBuilder;
pub use error::{Error, Result};
pub use input::BitInput;
pub use order::{BinConfig, BitOrder, BitWidth, ByteOrder};
pub use output::BitOutput;
pub use sink::Sink;
