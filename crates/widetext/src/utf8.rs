//! UTF-8 width and lead-byte tables.
//!
//! Ranges follow RFC 3629:
//!
//! ```text
//! UTF8-1 = %x00-7F
//! UTF8-2 = %xC2-DF UTF8-tail
//! UTF8-3 = %xE0 %xA0-BF UTF8-tail / %xE1-EC 2( UTF8-tail ) /
//!          %xED %x80-9F UTF8-tail / %xEE-EF 2( UTF8-tail )
//! UTF8-4 = %xF0 %x90-BF 2( UTF8-tail ) / %xF1-F3 3( UTF8-tail ) /
//!          %xF4 %x80-8F 2( UTF8-tail )
//! ```
//!
//! The narrowed second-byte ranges after `E0`, `ED`, `F0` and `F4` are what
//! reject overlong forms, surrogates and values above U+10FFFF, so the
//! assembled scalar never needs a second check. A sequence cut off by the end
//! of the input is only checked for continuation tags: the range checks run
//! once every byte the lead announces is present.

use crate::outcome::{Fault, MalformedKind};

/// Largest scalar value.
pub const MAX_SCALAR: u32 = 0x10_FFFF;

/// Longest UTF-8 encoding of a single scalar, in bytes.
pub const MAX_UTF8_WIDTH: usize = 4;

const CONT_MASK: u8 = 0b0011_1111;
const TAG_CONT: u8 = 0b1000_0000;

/// Whether `value` is a Unicode scalar value.
#[must_use]
pub const fn is_scalar(value: u32) -> bool {
    value <= MAX_SCALAR && !is_surrogate(value)
}

/// Whether `value` lies in the surrogate block `D800..=DFFF`.
#[must_use]
pub const fn is_surrogate(value: u32) -> bool {
    value >= 0xD800 && value <= 0xDFFF
}

/// Number of bytes the UTF-8 encoding of `scalar` occupies.
///
/// The input is not validated; callers check [`is_scalar`] first.
#[must_use]
pub const fn utf8_width(scalar: u32) -> usize {
    match scalar {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

/// Write the UTF-8 form of `scalar` into `dst`, which must be exactly
/// `utf8_width(scalar)` bytes long.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn write_utf8(scalar: u32, dst: &mut [u8]) {
    debug_assert!(is_scalar(scalar));
    debug_assert_eq!(dst.len(), utf8_width(scalar));
    match dst {
        [a] => *a = scalar as u8,
        [a, b] => {
            *a = 0b1100_0000 | (scalar >> 6) as u8;
            *b = TAG_CONT | (scalar as u8 & CONT_MASK);
        }
        [a, b, c] => {
            *a = 0b1110_0000 | (scalar >> 12) as u8;
            *b = TAG_CONT | ((scalar >> 6) as u8 & CONT_MASK);
            *c = TAG_CONT | (scalar as u8 & CONT_MASK);
        }
        [a, b, c, d] => {
            *a = 0b1111_0000 | (scalar >> 18) as u8;
            *b = TAG_CONT | ((scalar >> 12) as u8 & CONT_MASK);
            *c = TAG_CONT | ((scalar >> 6) as u8 & CONT_MASK);
            *d = TAG_CONT | (scalar as u8 & CONT_MASK);
        }
        _ => unreachable!("UTF-8 sequences are 1 to 4 bytes"),
    }
}

/// What a lead byte says about the sequence it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lead {
    /// Total sequence length including the lead byte.
    pub(crate) len: u8,
    /// Payload bits carried by the lead byte.
    bits: u32,
    /// Inclusive range allowed for the second byte.
    lower: u8,
    upper: u8,
    /// Reported when the second byte is a continuation byte above `upper`.
    above: MalformedKind,
}

impl Lead {
    const fn multi(len: u8, bits: u32, lower: u8, upper: u8, above: MalformedKind) -> Self {
        Self {
            len,
            bits,
            lower,
            upper,
            above,
        }
    }

    const fn tail(len: u8, bits: u32) -> Self {
        Self::multi(len, bits, 0x80, 0xBF, MalformedKind::InvalidContinuation)
    }
}

/// Classify a lead byte.
pub(crate) const fn classify_lead(b: u8) -> Result<Lead, MalformedKind> {
    let bits = b as u32;
    match b {
        0x00..=0x7F => Ok(Lead::tail(1, bits)),
        0x80..=0xBF => Err(MalformedKind::UnexpectedContinuation),
        // C0 and C1 can only start an overlong form of U+0000..=U+007F.
        0xC0 | 0xC1 => Err(MalformedKind::Overlong),
        0xC2..=0xDF => Ok(Lead::tail(2, bits & 0x1F)),
        0xE0 => Ok(Lead::multi(3, bits & 0x0F, 0xA0, 0xBF, MalformedKind::InvalidContinuation)),
        0xED => Ok(Lead::multi(3, bits & 0x0F, 0x80, 0x9F, MalformedKind::Surrogate)),
        0xE1..=0xEF => Ok(Lead::tail(3, bits & 0x0F)),
        0xF0 => Ok(Lead::multi(4, bits & 0x07, 0x90, 0xBF, MalformedKind::InvalidContinuation)),
        0xF4 => Ok(Lead::multi(4, bits & 0x07, 0x80, 0x8F, MalformedKind::OutOfRange)),
        0xF1..=0xF3 => Ok(Lead::tail(4, bits & 0x07)),
        0xF5..=0xF7 => Err(MalformedKind::OutOfRange),
        0xF8..=0xFF => Err(MalformedKind::InvalidLead),
    }
}

/// Why a sequence at the front of the input could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SequenceError {
    /// The input ends before the `expected` bytes of the sequence, with only
    /// continuation bytes after the lead.
    Truncated { expected: u8 },
    Malformed(Fault),
}

/// Decode the scalar at the front of `src`, returning it with the number of
/// bytes it spans.
///
/// Running out of input wins over the range checks: `E0 80` at the end of
/// `src` is [`SequenceError::Truncated`], `E0 80 80` is overlong. A
/// non-continuation byte inside the sequence is malformed either way.
///
/// `src` must not be empty.
pub(crate) fn read_sequence(src: &[u8]) -> Result<(u32, usize), SequenceError> {
    let lead =
        classify_lead(src[0]).map_err(|kind| SequenceError::Malformed(malformed(kind, 1)))?;
    let len = usize::from(lead.len);

    let present = &src[..len.min(src.len())];
    if present.len() < len && present[1..].iter().all(|&b| is_continuation(b)) {
        return Err(SequenceError::Truncated { expected: lead.len });
    }

    match validate_tail(present, lead) {
        Ok(scalar) if present.len() == len => {
            debug_assert!(is_scalar(scalar));
            debug_assert_eq!(utf8_width(scalar), len);
            Ok((scalar, len))
        }
        Ok(_) => Err(SequenceError::Truncated { expected: lead.len }),
        Err(fault) => Err(SequenceError::Malformed(fault)),
    }
}

/// Length of the maximal ill-formed subpart at the front of `src`: the
/// longest prefix that starts a well-formed sequence, or one byte if there
/// is none. This is the span a lossy decoder replaces with a single U+FFFD.
///
/// `src` must not be empty.
pub(crate) fn maximal_subpart(src: &[u8]) -> usize {
    let Ok(lead) = classify_lead(src[0]) else {
        return 1;
    };
    let present = &src[..usize::from(lead.len).min(src.len())];
    match validate_tail(present, lead) {
        Ok(_) => present.len(),
        Err(Fault::MalformedSequence { len, .. }) => usize::from(len),
        Err(Fault::InvalidCodePoint { .. }) => 1,
    }
}

fn malformed(kind: MalformedKind, len: u8) -> Fault {
    Fault::MalformedSequence { kind, len }
}

const fn is_continuation(b: u8) -> bool {
    b & !CONT_MASK == TAG_CONT
}

/// Check the bytes after the lead against the RFC 3629 ranges and assemble
/// the payload bits. On failure the fault length is the number of bytes
/// before the offending one.
fn validate_tail(present: &[u8], lead: Lead) -> Result<u32, Fault> {
    let mut scalar = lead.bits;
    for (pos, &b) in present.iter().enumerate().skip(1) {
        // `pos` never exceeds 3, so the fault length always fits.
        #[expect(clippy::cast_possible_truncation)]
        let seen = pos as u8;
        if !is_continuation(b) {
            return Err(malformed(MalformedKind::InvalidContinuation, seen));
        }
        if pos == 1 {
            if b < lead.lower {
                return Err(malformed(MalformedKind::Overlong, seen));
            }
            if b > lead.upper {
                return Err(malformed(lead.above, seen));
            }
        }
        scalar = (scalar << 6) | u32::from(b & CONT_MASK);
    }
    Ok(scalar)
}

/// Exact UTF-8 length of a sequence of scalars.
pub(crate) fn encoded_len(scalars: impl Iterator<Item = u32>) -> usize {
    scalars.map(utf8_width).sum()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0x00, 1)]
    #[case(0x7F, 1)]
    #[case(0x80, 2)]
    #[case(0x7FF, 2)]
    #[case(0x800, 3)]
    #[case(0xFFFF, 3)]
    #[case(0x10000, 4)]
    #[case(0x10_FFFF, 4)]
    fn width_table_boundaries(#[case] scalar: u32, #[case] width: usize) {
        assert_eq!(utf8_width(scalar), width);

        let mut buf = vec![0u8; width];
        write_utf8(scalar, &mut buf);
        let expected = char::from_u32(scalar).unwrap();
        let mut std_buf = [0u8; 4];
        assert_eq!(&buf[..], expected.encode_utf8(&mut std_buf).as_bytes());
        assert_eq!(read_sequence(&buf), Ok((scalar, width)));
    }

    #[rstest]
    #[case(0xD800, false)]
    #[case(0xDFFF, false)]
    #[case(0xD7FF, true)]
    #[case(0xE000, true)]
    #[case(0x11_0000, false)]
    #[case(u32::MAX, false)]
    fn scalar_validity(#[case] value: u32, #[case] valid: bool) {
        assert_eq!(is_scalar(value), valid);
    }

    #[rstest]
    #[case(&[0x80], MalformedKind::UnexpectedContinuation, 1)]
    #[case(&[0xBF, 0x80], MalformedKind::UnexpectedContinuation, 1)]
    #[case(&[0xC0, 0x80], MalformedKind::Overlong, 1)]
    #[case(&[0xC1, 0xBF], MalformedKind::Overlong, 1)]
    #[case(&[0xE0, 0x80, 0x80], MalformedKind::Overlong, 1)]
    #[case(&[0xF0, 0x8F, 0xBF, 0xBF], MalformedKind::Overlong, 1)]
    #[case(&[0xED, 0xA0, 0x80], MalformedKind::Surrogate, 1)]
    #[case(&[0xED, 0xBF, 0xBF], MalformedKind::Surrogate, 1)]
    #[case(&[0xF4, 0x90, 0x80, 0x80], MalformedKind::OutOfRange, 1)]
    #[case(&[0xF5, 0x80, 0x80, 0x80], MalformedKind::OutOfRange, 1)]
    #[case(&[0xF8, 0x88, 0x80, 0x80, 0x80], MalformedKind::InvalidLead, 1)]
    #[case(&[0xFF], MalformedKind::InvalidLead, 1)]
    #[case(&[0xC2, 0x41], MalformedKind::InvalidContinuation, 1)]
    #[case(&[0xE2, 0x82, 0x41], MalformedKind::InvalidContinuation, 2)]
    #[case(&[0xF0, 0x9F, 0x98, 0xC0], MalformedKind::InvalidContinuation, 3)]
    fn malformed_sequences(#[case] src: &[u8], #[case] kind: MalformedKind, #[case] len: u8) {
        assert_eq!(
            read_sequence(src),
            Err(SequenceError::Malformed(Fault::MalformedSequence { kind, len }))
        );
    }

    #[rstest]
    #[case(&[0xC2], 2)]
    #[case(&[0xE2, 0x82], 3)]
    #[case(&[0xF0], 4)]
    #[case(&[0xF0, 0x9F, 0x98], 4)]
    #[case(&[0xE0, 0x80], 3)]
    #[case(&[0xED, 0xA0], 3)]
    #[case(&[0xF4, 0x90], 4)]
    #[case(&[0xF0, 0x8F, 0xBF], 4)]
    fn truncated_prefixes(#[case] src: &[u8], #[case] expected: u8) {
        assert_eq!(read_sequence(src), Err(SequenceError::Truncated { expected }));
    }

    #[rstest]
    #[case(&[0x80], 1)]
    #[case(&[0xC2], 1)]
    #[case(&[0xE2, 0x82], 2)]
    #[case(&[0xE2, 0x82, 0x41], 2)]
    #[case(&[0xE0, 0x80], 1)]
    #[case(&[0xED, 0xA0], 1)]
    #[case(&[0xF0, 0x9F, 0x98], 3)]
    #[case(&[0xF4, 0x90], 1)]
    #[case(&[0xF0, 0x8F, 0xBF], 1)]
    fn maximal_subpart_lengths(#[case] src: &[u8], #[case] len: usize) {
        assert_eq!(maximal_subpart(src), len);
    }

    #[test]
    fn encoded_len_sums_widths() {
        assert_eq!(encoded_len([0x41, 0xE9, 0x20AC, 0x1F600].into_iter()), 10);
        assert_eq!(encoded_len(core::iter::empty()), 0);
    }
}
