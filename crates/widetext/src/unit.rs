//! Internal code units.
//!
//! The internal string is a sequence of fixed-width units. Two widths are
//! supported:
//!
//! - `u32` holds one scalar per unit.
//! - `u16` holds scalars up to U+FFFF in one unit and everything above as a
//!   surrogate pair, the way UTF-16 does. Decoding never narrows a scalar.

use core::{fmt, hash::Hash};

use crate::utf8::{is_scalar, is_surrogate};

mod sealed {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// The internal `wchar_t`-like unit of the host platform.
#[cfg(windows)]
pub type WChar = u16;

/// The internal `wchar_t`-like unit of the host platform.
#[cfg(not(windows))]
pub type WChar = u32;

/// A fixed-width unit of internal text.
///
/// This trait is sealed; it is implemented for `u16` and `u32`.
pub trait CodeUnit:
    sealed::Sealed + Copy + Default + Eq + Ord + Hash + fmt::Debug + 'static
{
    /// Read the scalar at the front of `src`, returning it with the number of
    /// units it spans.
    ///
    /// On failure returns the offending unit widened to `u32`. `src` must not
    /// be empty.
    ///
    /// # Errors
    ///
    /// The front unit (or unit pair) is not a Unicode scalar value.
    fn read_scalar(src: &[Self]) -> Result<(u32, usize), u32>;

    /// Write `scalar` at the front of `dst`, returning the number of units
    /// written, or `None` if `dst` is too short.
    fn write_scalar(scalar: u32, dst: &mut [Self]) -> Option<usize>;

    /// The unit widened to `u32`.
    fn to_u32(self) -> u32;
}

impl CodeUnit for u32 {
    #[inline]
    fn read_scalar(src: &[Self]) -> Result<(u32, usize), u32> {
        let value = src[0];
        if is_scalar(value) {
            Ok((value, 1))
        } else {
            Err(value)
        }
    }

    #[inline]
    fn write_scalar(scalar: u32, dst: &mut [Self]) -> Option<usize> {
        *dst.first_mut()? = scalar;
        Some(1)
    }

    #[inline]
    fn to_u32(self) -> u32 {
        self
    }
}

const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

impl CodeUnit for u16 {
    #[inline]
    fn read_scalar(src: &[Self]) -> Result<(u32, usize), u32> {
        let first = u32::from(src[0]);
        if !is_surrogate(first) {
            return Ok((first, 1));
        }
        // A lone high surrogate at the end of the input is not waited on:
        // nothing is carried into the next call.
        match src.get(1).copied().map(u32::from) {
            Some(second)
                if HIGH_SURROGATES.contains(&first) && LOW_SURROGATES.contains(&second) =>
            {
                Ok((0x1_0000 + ((first - 0xD800) << 10) + (second - 0xDC00), 2))
            }
            _ => Err(first),
        }
    }

    #[inline]
    #[expect(clippy::cast_possible_truncation)]
    fn write_scalar(scalar: u32, dst: &mut [Self]) -> Option<usize> {
        if scalar <= 0xFFFF {
            *dst.first_mut()? = scalar as u16;
            return Some(1);
        }
        let [high, low, ..] = dst else {
            return None;
        };
        let offset = scalar - 0x1_0000;
        *high = 0xD800 | (offset >> 10) as u16;
        *low = 0xDC00 | (offset & 0x3FF) as u16;
        Some(2)
    }

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

/// Iterate over the scalars of `units`, yielding `Err(unit)` for each unit
/// that does not start a valid scalar and skipping past it.
pub(crate) fn scalars<U: CodeUnit>(
    units: &[U],
) -> impl Iterator<Item = Result<u32, u32>> + '_ {
    let mut pos = 0;
    core::iter::from_fn(move || {
        let rest = units.get(pos..).filter(|rest| !rest.is_empty())?;
        Some(match U::read_scalar(rest) {
            Ok((scalar, len)) => {
                pos += len;
                Ok(scalar)
            }
            Err(unit) => {
                pos += 1;
                Err(unit)
            }
        })
    })
}
