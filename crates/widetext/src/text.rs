//! The wide string value type.

use alloc::{string::String, vec, vec::Vec};
use core::{fmt, str::FromStr};

use log::error;

use crate::{
    codec::Utf8Codec,
    error::ConversionError,
    options::{CodecOptions, MalformedInput, ScratchSizing},
    outcome::{ConversionState, Fault, Outcome},
    transcoder::encode_chunk,
    unit::{CodeUnit, WChar, scalars},
    utf8::MAX_UTF8_WIDTH,
};

/// Text stored as fixed-width internal units.
///
/// Conversions to and from UTF-8 go through a [`Utf8Codec`]; the plain
/// methods use the default codec, the `*_with` methods take one explicitly.
///
/// ```
/// use widetext::WideString;
///
/// let mut s = WideString::<u16>::new();
/// s.set_utf8("grüße 😀").unwrap();
/// assert_eq!(s.len(), 8);
/// assert_eq!(s.to_utf8().unwrap(), "grüße 😀");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideString<U: CodeUnit = WChar> {
    units: Vec<U>,
}

impl<U: CodeUnit> WideString<U> {
    /// An empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Wrap existing units without validating them.
    #[must_use]
    pub const fn from_units(units: Vec<U>) -> Self {
        Self { units }
    }

    /// Decode `external` UTF-8 into a new string.
    ///
    /// # Errors
    ///
    /// See [`Utf8Codec::from_bytes`].
    pub fn from_utf8(external: impl AsRef<[u8]>) -> Result<Self, ConversionError> {
        let mut text = Self::new();
        text.set_utf8(external)?;
        Ok(text)
    }

    /// Decode `external`, replacing malformed sequences with U+FFFD.
    #[must_use]
    pub fn from_utf8_lossy(external: impl AsRef<[u8]>) -> Self {
        let codec = Utf8Codec::new(CodecOptions {
            malformed: MalformedInput::Replace,
            ..Default::default()
        });
        let mut units = Vec::new();
        match codec.from_bytes(external.as_ref(), &mut units) {
            Ok(_) => Self { units },
            // Replacement never rejects input and the codec sizes its own
            // buffer, so this arm is unreachable in practice.
            Err(err) => {
                error!("lossy decoding failed: {err}");
                Self::new()
            }
        }
    }

    /// Replace the content with the decoded form of `external`.
    ///
    /// The string is left unchanged if decoding fails.
    ///
    /// # Errors
    ///
    /// See [`Utf8Codec::from_bytes`].
    pub fn set_utf8(&mut self, external: impl AsRef<[u8]>) -> Result<&mut Self, ConversionError> {
        self.set_utf8_with(external, &Utf8Codec::default())
    }

    /// [`set_utf8`](Self::set_utf8) with an explicit codec.
    ///
    /// # Errors
    ///
    /// See [`Utf8Codec::from_bytes`].
    pub fn set_utf8_with(
        &mut self,
        external: impl AsRef<[u8]>,
        codec: &Utf8Codec,
    ) -> Result<&mut Self, ConversionError> {
        let mut units = Vec::new();
        codec.from_bytes(external.as_ref(), &mut units)?;
        self.units = units;
        Ok(self)
    }

    /// Encode the string as UTF-8.
    ///
    /// # Errors
    ///
    /// [`ConversionError::InvalidCodePoint`] if the string holds a unit that
    /// is not a scalar value.
    pub fn to_utf8(&self) -> Result<String, ConversionError> {
        self.to_utf8_with(&Utf8Codec::default())
    }

    /// [`to_utf8`](Self::to_utf8) with an explicit codec.
    ///
    /// # Errors
    ///
    /// [`ConversionError::InvalidCodePoint`] if the string holds a unit that
    /// is not a scalar value. The scratch buffer always fits valid text, so
    /// [`ConversionError::InsufficientOutputCapacity`] signals a defect in
    /// the sizing and is logged as such.
    pub fn to_utf8_with(&self, codec: &Utf8Codec) -> Result<String, ConversionError> {
        let capacity = match codec.options().scratch {
            ScratchSizing::WorstCase => worst_case_scratch(self.units.len())
                .unwrap_or_else(|| Utf8Codec::encoded_len(&self.units)),
            ScratchSizing::Exact => Utf8Codec::encoded_len(&self.units),
        };
        let mut scratch = vec![0u8; capacity];
        let written = codec.to_bytes(&self.units, &mut scratch).inspect_err(|err| {
            if err.is_capacity() {
                error!("scratch buffer of {capacity} bytes too small: {err}");
            }
        })?;
        scratch.truncate(written);
        // The encoder only emits well-formed UTF-8.
        Ok(String::from_utf8(scratch)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }

    /// The internal units.
    #[must_use]
    pub fn as_units(&self) -> &[U] {
        &self.units
    }

    /// Mutable access to the internal units.
    pub fn as_units_mut(&mut self) -> &mut [U] {
        &mut self.units
    }

    /// Unwrap into the internal units.
    #[must_use]
    pub fn into_units(self) -> Vec<U> {
        self.units
    }

    /// Number of internal units (not characters).
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the string holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Resize to `len` units, padding with zero units.
    pub fn resize(&mut self, len: usize) {
        self.units.resize(len, U::default());
    }

    /// Unit at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<U> {
        self.units.get(index).copied()
    }

    /// Whether every unit belongs to a valid scalar, i.e. whether
    /// [`to_utf8`](Self::to_utf8) will succeed.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        scalars(&self.units).all(|scalar| scalar.is_ok())
    }
}

/// Four bytes per unit plus one, or `None` where that overflows `usize`
/// (only reachable on 32-bit targets), in which case the exact length is
/// used instead.
fn worst_case_scratch(units: usize) -> Option<usize> {
    units.checked_mul(MAX_UTF8_WIDTH)?.checked_add(1)
}

impl<U: CodeUnit> From<&str> for WideString<U> {
    fn from(s: &str) -> Self {
        // Well-formed input decodes the same with or without replacement.
        Self::from_utf8_lossy(s)
    }
}

impl<U: CodeUnit> FromStr for WideString<U> {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_utf8(s)
    }
}

impl<U: CodeUnit> From<Vec<U>> for WideString<U> {
    fn from(units: Vec<U>) -> Self {
        Self::from_units(units)
    }
}

impl<U: CodeUnit> TryFrom<&WideString<U>> for String {
    type Error = ConversionError;

    fn try_from(text: &WideString<U>) -> Result<Self, Self::Error> {
        text.to_utf8()
    }
}

/// Lossy: units that are not scalar values print as U+FFFD.
impl<U: CodeUnit> fmt::Display for WideString<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 64];
        let mut rest = &self.units[..];
        let mut state = ConversionState::new();
        while !rest.is_empty() {
            let (outcome, read, written) = encode_chunk(&mut state, rest, &mut buf);
            f.write_str(core::str::from_utf8(&buf[..written]).map_err(|_| fmt::Error)?)?;
            rest = &rest[read..];
            if let Outcome::Error(Fault::InvalidCodePoint { .. }) = outcome {
                f.write_str("\u{FFFD}")?;
                rest = &rest[1..];
            }
        }
        Ok(())
    }
}

impl<U: CodeUnit> fmt::Debug for WideString<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", alloc::format!("{self}"))
    }
}
