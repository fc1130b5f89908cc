use num_enum::TryFromPrimitive;

/// Which unfilled position of a partially built byte the next bit occupies.
///
/// The order is fixed for the whole life of a bit stream because it governs
/// the in-flight accumulator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// First bit written lands in the least significant free position.
    #[default]
    Lsb0,
    /// First bit written lands in the most significant free position.
    /// Whole bytes are emitted bit-reversed in this mode.
    Msb0,
}

/// Which constituent byte of a multi-byte scalar is emitted first.
///
/// May be switched between writes; only affects writes issued afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Width of a sub-byte bit group, 1 to 8 bits.
///
/// `BitWidth::try_from(n)` is the checked entry point for runtime widths;
/// out-of-range values convert into [crate::Error::InvalidBitWidth].
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum BitWidth {
    Bits1 = 1,
    Bits2 = 2,
    Bits3 = 3,
    Bits4 = 4,
    Bits5 = 5,
    Bits6 = 6,
    Bits7 = 7,
    Bits8 = 8,
}

impl BitWidth {
    pub const fn get(self) -> u8 {
        self as u8
    }
}

/// Construction-time configuration of a builder or bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinConfig {
    pub byte_order: ByteOrder,
    pub bit_order: BitOrder,
}

impl BinConfig {
    pub fn new(byte_order: ByteOrder, bit_order: BitOrder) -> Self {
        Self {
            byte_order,
            bit_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_bit_width_checked_conversion() {
        assert_eq!(BitWidth::try_from(3).unwrap(), BitWidth::Bits3);
        assert!(BitWidth::try_from(0).is_err());
        assert!(BitWidth::try_from(9).is_err());
    }

    #[test]
    fn test_bit_width_error_carries_value() {
        let err: Error = BitWidth::try_from(9).unwrap_err().into();
        match err {
            Error::InvalidBitWidth(9) => {}
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = BinConfig::default();
        assert_eq!(config.bit_order, BitOrder::Lsb0);
        assert_eq!(config.byte_order, ByteOrder::BigEndian);
    }
}
