use thiserror::Error;

use crate::outcome::{Fault, MalformedKind};

/// Why a whole-buffer conversion failed.
///
/// Offsets are in units of the input: internal code units when encoding,
/// bytes when decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// The internal text holds a unit that is not a Unicode scalar value.
    #[error("invalid code point {value:#06X} at unit {offset}")]
    InvalidCodePoint {
        /// The offending unit, widened to 32 bits.
        value: u32,
        /// Index of the offending unit.
        offset: usize,
    },
    /// The input bytes are not UTF-8.
    #[error("malformed UTF-8 ({kind}) at byte {offset}")]
    MalformedSequence {
        /// What was wrong with the bytes.
        kind: MalformedKind,
        /// Length of the maximal ill-formed subpart.
        len: u8,
        /// Offset of the first byte of the sequence.
        offset: usize,
    },
    /// The input ends inside a UTF-8 sequence.
    #[error("truncated UTF-8 sequence at byte {offset}: {available} of {expected} bytes present")]
    Truncated {
        /// Offset of the lead byte.
        offset: usize,
        /// Bytes present from the lead byte to the end of the input.
        available: usize,
        /// Length announced by the lead byte.
        expected: u8,
    },
    /// The output buffer filled up before the input was consumed.
    #[error("output buffer of {capacity} full after consuming {consumed} and producing {produced}")]
    InsufficientOutputCapacity {
        /// Size of the output buffer.
        capacity: usize,
        /// Input elements converted before the buffer filled.
        consumed: usize,
        /// Output elements written before the buffer filled.
        produced: usize,
    },
}

impl ConversionError {
    pub(crate) fn from_fault(fault: Fault, offset: usize) -> Self {
        match fault {
            Fault::InvalidCodePoint { value } => Self::InvalidCodePoint { value, offset },
            Fault::MalformedSequence { kind, len } => Self::MalformedSequence { kind, len, offset },
        }
    }

    /// Whether the failure was caused by a too-small output buffer rather
    /// than by bad input.
    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(self, Self::InsufficientOutputCapacity { .. })
    }

    /// Position of the fault in the input.
    ///
    /// For [`InsufficientOutputCapacity`](Self::InsufficientOutputCapacity)
    /// this is the first input element that was not converted.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match *self {
            Self::InvalidCodePoint { offset, .. }
            | Self::MalformedSequence { offset, .. }
            | Self::Truncated { offset, .. } => offset,
            Self::InsufficientOutputCapacity { consumed, .. } => consumed,
        }
    }
}
