//! Whole-buffer conversion on top of the transcoder.
//!
//! Each call makes a single transcoder pass from a fresh
//! [`ConversionState`] and treats anything short of [`Outcome::Ok`] as a
//! failure of the whole call. Buffers are never grown and passes are never
//! retried here; the caller picks the output size.

use alloc::vec::Vec;

use log::{debug, trace};

use crate::{
    error::ConversionError,
    options::{CodecOptions, MalformedInput},
    outcome::{ConversionState, Fault, Outcome, Shortfall},
    transcoder::{decode_chunk, encode_chunk},
    unit::{CodeUnit, scalars},
    utf8::{classify_lead, encoded_len, maximal_subpart},
};

const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// Converts whole internal strings to UTF-8 and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec {
    options: CodecOptions,
}

impl Utf8Codec {
    /// A codec with the given options.
    #[must_use]
    pub const fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The options this codec was built with.
    #[must_use]
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encode all of `text` into `out`, returning the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::InvalidCodePoint`] if `text` holds a unit that is
    ///   not a scalar value.
    /// - [`ConversionError::InsufficientOutputCapacity`] if `out` is too small.
    ///   [`Self::encoded_len`] gives the size that always suffices for valid
    ///   text.
    pub fn to_bytes<U: CodeUnit>(
        &self,
        text: &[U],
        out: &mut [u8],
    ) -> Result<usize, ConversionError> {
        let mut state = ConversionState::new();
        let (outcome, read, written) = encode_chunk(&mut state, text, out);
        match outcome {
            Outcome::Ok => {
                trace!("encoded {read} units into {written} bytes");
                Ok(written)
            }
            Outcome::Partial(_) => Err(capacity_error(out.len(), &state)),
            Outcome::Error(fault) => {
                let err = ConversionError::from_fault(fault, state.consumed());
                debug!("encoding failed: {err}");
                Err(err)
            }
        }
    }

    /// Decode all of `input` into `text`, returning the number of bytes
    /// consumed, which equals `input.len()` on success.
    ///
    /// `text` is resized to `input.len() + 1` units before decoding (UTF-8
    /// never yields more units than bytes) and shrunk to the units produced
    /// afterwards. On failure `text` is left empty.
    ///
    /// # Errors
    ///
    /// With [`MalformedInput::Reject`]:
    /// - [`ConversionError::MalformedSequence`] for bytes that are not UTF-8.
    /// - [`ConversionError::Truncated`] if the input ends inside a sequence.
    ///
    /// With [`MalformedInput::Replace`] decoding cannot fail on bad input.
    pub fn from_bytes<U: CodeUnit>(
        &self,
        input: &[u8],
        text: &mut Vec<U>,
    ) -> Result<usize, ConversionError> {
        text.clear();
        text.resize(input.len() + 1, U::default());

        let result = match self.options.malformed {
            MalformedInput::Reject => decode_strict(input, text),
            MalformedInput::Replace => decode_lossy(input, text),
        };
        match result {
            Ok((read, written)) => {
                trace!("decoded {read} bytes into {written} units");
                text.truncate(written);
                Ok(read)
            }
            Err(err) => {
                debug!("decoding failed: {err}");
                text.clear();
                Err(err)
            }
        }
    }

    /// Exact number of bytes the UTF-8 form of `text` occupies. Units that
    /// do not form a scalar value count as zero bytes.
    #[must_use]
    pub fn encoded_len<U: CodeUnit>(text: &[U]) -> usize {
        encoded_len(scalars(text).filter_map(Result::ok))
    }
}

fn capacity_error(capacity: usize, state: &ConversionState) -> ConversionError {
    let err = ConversionError::InsufficientOutputCapacity {
        capacity,
        consumed: state.consumed(),
        produced: state.produced(),
    };
    debug!("{err}");
    err
}

fn decode_strict<U: CodeUnit>(
    input: &[u8],
    text: &mut [U],
) -> Result<(usize, usize), ConversionError> {
    let mut state = ConversionState::new();
    let (outcome, read, written) = decode_chunk(&mut state, input, text);
    match outcome {
        Outcome::Ok => Ok((read, written)),
        Outcome::Partial(Shortfall::InputTruncated) => Err(truncated_error(input, read)),
        Outcome::Partial(Shortfall::OutputFull) => Err(capacity_error(text.len(), &state)),
        Outcome::Error(fault) => Err(ConversionError::from_fault(fault, read)),
    }
}

/// Decode with U+FFFD substituted for every maximal ill-formed subpart.
///
/// A trailing prefix the strict decoder reports as truncated may still be
/// doomed (`E0 80`); only its maximal subpart is replaced and decoding
/// resumes after it.
///
/// Every substitution consumes at least one byte and writes one unit, so the
/// `input.len() + 1` units handed in by `from_bytes` always suffice.
fn decode_lossy<U: CodeUnit>(
    input: &[u8],
    text: &mut [U],
) -> Result<(usize, usize), ConversionError> {
    let mut state = ConversionState::new();
    loop {
        let (read, written) = (state.consumed(), state.produced());
        let (outcome, ..) = decode_chunk(&mut state, &input[read..], &mut text[written..]);
        let skip = match outcome {
            Outcome::Ok => return Ok((state.consumed(), state.produced())),
            Outcome::Partial(Shortfall::OutputFull) => {
                return Err(capacity_error(text.len(), &state));
            }
            Outcome::Partial(Shortfall::InputTruncated) => {
                maximal_subpart(&input[state.consumed()..])
            }
            Outcome::Error(Fault::MalformedSequence { len, .. }) => usize::from(len),
            Outcome::Error(fault @ Fault::InvalidCodePoint { .. }) => {
                return Err(ConversionError::from_fault(fault, state.consumed()));
            }
        };
        let Some(units) = U::write_scalar(REPLACEMENT_CHARACTER, &mut text[state.produced()..])
        else {
            return Err(capacity_error(text.len(), &state));
        };
        trace!("replaced {skip} malformed bytes at {}", state.consumed());
        state.advance(skip, units);
    }
}

fn truncated_error(input: &[u8], offset: usize) -> ConversionError {
    let expected = classify_lead(input[offset]).map_or(0, |lead| lead.len);
    ConversionError::Truncated {
        offset,
        available: input.len() - offset,
        expected,
    }
}
