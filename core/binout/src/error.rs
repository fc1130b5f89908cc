use crate::order::BitOrder;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // === External Errors (Automatic conversion) ===
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    // === Logic Errors (Specific variants) ===
    /// Operation was attempted on a builder that has already been ended.
    #[error("Operation '{0}' attempted on an ended builder")]
    AlreadyEnded(&'static str),

    /// A caller-supplied bit output stream uses a different bit order than
    /// the one requested for the builder.
    #[error("Bit order conflict: requested {expected:?} but the supplied bit stream uses {actual:?}")]
    BitOrderConflict { expected: BitOrder, actual: BitOrder },

    /// Bit group width outside 1..=8.
    #[error("Invalid bit width: {0} (expected 1..=8)")]
    InvalidBitWidth(u8),
}

impl From<num_enum::TryFromPrimitiveError<crate::order::BitWidth>> for Error {
    fn from(err: num_enum::TryFromPrimitiveError<crate::order::BitWidth>) -> Self {
        Error::InvalidBitWidth(err.number)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
