use core::fmt;

/// Result of one transcoder call.
///
/// The read/written counts returned next to it are accurate for every
/// variant: on `Partial` and `Error` they point at the first unit or byte
/// that was not converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All input was consumed.
    Ok,
    /// Conversion stopped early without encountering bad input.
    Partial(Shortfall),
    /// The input holds an invalid code point or a malformed byte sequence at
    /// the current position.
    Error(Fault),
}

impl Outcome {
    /// Whether the whole input was converted.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Why a transcoder call returned [`Outcome::Partial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    /// The output cannot hold the next converted scalar. Retry the unread
    /// input with more room.
    OutputFull,
    /// The input ends inside a UTF-8 sequence whose bytes so far are a valid
    /// prefix.
    ///
    /// Sequences are never carried from one call to the next, so the caller
    /// has to re-submit the prefix together with the bytes that complete it.
    InputTruncated,
}

/// The bad input behind an [`Outcome::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Encoding met a unit (or unit pair) that is not a Unicode scalar value:
    /// a surrogate, an unpaired UTF-16 surrogate, or a value above U+10FFFF.
    InvalidCodePoint {
        /// The offending unit, widened to 32 bits.
        value: u32,
    },
    /// Decoding met bytes that no amount of further input could make valid.
    MalformedSequence {
        /// What was wrong with the bytes.
        kind: MalformedKind,
        /// Length of the maximal ill-formed subpart, 1 to 3 bytes.
        len: u8,
    },
}

/// Classification of a malformed UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedKind {
    /// A continuation byte (`80..=BF`) where a lead byte was expected.
    UnexpectedContinuation,
    /// A byte in `F8..=FF`, which never appears in UTF-8.
    InvalidLead,
    /// A byte other than `80..=BF` where a continuation byte was expected.
    InvalidContinuation,
    /// The sequence is longer than the shortest form of its scalar.
    Overlong,
    /// The sequence would decode to a value in `D800..=DFFF`.
    Surrogate,
    /// The sequence would decode to a value above U+10FFFF.
    OutOfRange,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnexpectedContinuation => "unexpected continuation byte",
            Self::InvalidLead => "invalid lead byte",
            Self::InvalidContinuation => "invalid continuation byte",
            Self::Overlong => "overlong encoding",
            Self::Surrogate => "encoded surrogate",
            Self::OutOfRange => "value above U+10FFFF",
        })
    }
}

/// Progress threaded through successive transcoder calls.
///
/// A multi-byte sequence is never held over between calls; the state only
/// counts how much input has been consumed and how much output produced
/// since the last [`reset`](Self::reset). A caller that resumes after
/// [`Shortfall::OutputFull`] with the unread input and a fresh output buffer
/// can use these totals as absolute positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionState {
    consumed: usize,
    produced: usize,
}

impl ConversionState {
    /// A state at the start of a conversion.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            consumed: 0,
            produced: 0,
        }
    }

    /// Forget all progress.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Input elements consumed so far (units when encoding, bytes when
    /// decoding).
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Output elements produced so far (bytes when encoding, units when
    /// decoding).
    #[must_use]
    pub const fn produced(&self) -> usize {
        self.produced
    }

    pub(crate) fn advance(&mut self, consumed: usize, produced: usize) {
        self.consumed += consumed;
        self.produced += produced;
    }
}
