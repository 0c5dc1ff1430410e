//! Chunk-level conversion between internal units and UTF-8.
//!
//! Both directions consume as much input and fill as much output as they
//! can, then report an [`Outcome`] together with the number of input
//! elements read and output elements written. The counts are exact on every
//! return path, so a caller can resume after [`Shortfall::OutputFull`] or
//! locate the fault behind an [`Outcome::Error`].
//!
//! Neither direction retries or recovers. A UTF-8 sequence is always
//! decoded within a single call: a sequence cut off by the end of the input
//! is reported as [`Shortfall::InputTruncated`] and left unread.

use crate::{
    outcome::{ConversionState, Fault, Outcome, Shortfall},
    unit::CodeUnit,
    utf8::{SequenceError, read_sequence, utf8_width, write_utf8},
};

/// Encode internal units as UTF-8.
///
/// Returns the outcome, the number of units read from `src` and the number
/// of bytes written to `dst`. `state` is advanced by the same amounts.
///
/// - An invalid code point stops the call with [`Outcome::Error`], the read
///   count pointing at the offending unit.
/// - A scalar that does not fit in the remaining output is left unread and
///   the call returns [`Shortfall::OutputFull`].
pub fn encode_chunk<U: CodeUnit>(
    state: &mut ConversionState,
    src: &[U],
    dst: &mut [u8],
) -> (Outcome, usize, usize) {
    let mut read = 0;
    let mut written = 0;

    let outcome = loop {
        // ASCII dominates real text; copy it without the generic path.
        while let (Some(&unit), Some(byte)) = (src.get(read), dst.get_mut(written)) {
            match u8::try_from(unit.to_u32()) {
                Ok(ascii) if ascii.is_ascii() => *byte = ascii,
                _ => break,
            }
            read += 1;
            written += 1;
        }

        let Some(rest) = src.get(read..).filter(|rest| !rest.is_empty()) else {
            break Outcome::Ok;
        };
        let (scalar, units) = match U::read_scalar(rest) {
            Ok(found) => found,
            Err(value) => break Outcome::Error(Fault::InvalidCodePoint { value }),
        };
        let width = utf8_width(scalar);
        let Some(out) = dst.get_mut(written..written + width) else {
            break Outcome::Partial(Shortfall::OutputFull);
        };
        write_utf8(scalar, out);
        read += units;
        written += width;
    };

    state.advance(read, written);
    (outcome, read, written)
}

/// Decode UTF-8 into internal units.
///
/// Returns the outcome, the number of bytes read from `src` and the number
/// of units written to `dst`. `state` is advanced by the same amounts.
///
/// - A malformed sequence (bad lead or continuation byte, overlong form,
///   encoded surrogate, value above U+10FFFF) stops the call with
///   [`Outcome::Error`], the read count pointing at the start of the
///   sequence.
/// - A sequence cut off by the end of `src` is left unread and the call
///   returns [`Shortfall::InputTruncated`], as long as every byte after the
///   lead is a continuation byte. The overlong, surrogate and range checks
///   only run once the whole sequence is present.
/// - A scalar that does not fit in the remaining output (two units for an
///   astral scalar in `u16` text) is left unread and the call returns
///   [`Shortfall::OutputFull`].
pub fn decode_chunk<U: CodeUnit>(
    state: &mut ConversionState,
    src: &[u8],
    dst: &mut [U],
) -> (Outcome, usize, usize) {
    let mut read = 0;
    let mut written = 0;

    let outcome = loop {
        let Some(rest) = src.get(read..).filter(|rest| !rest.is_empty()) else {
            break Outcome::Ok;
        };
        let (scalar, len) = match read_sequence(rest) {
            Ok(found) => found,
            Err(SequenceError::Truncated { .. }) => {
                break Outcome::Partial(Shortfall::InputTruncated);
            }
            Err(SequenceError::Malformed(fault)) => break Outcome::Error(fault),
        };
        let Some(units) = dst
            .get_mut(written..)
            .and_then(|out| U::write_scalar(scalar, out))
        else {
            break Outcome::Partial(Shortfall::OutputFull);
        };
        read += len;
        written += units;
    };

    state.advance(read, written);
    (outcome, read, written)
}
