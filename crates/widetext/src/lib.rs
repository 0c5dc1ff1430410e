//! Conversion between fixed-width wide strings and UTF-8.
//!
//! Three layers, leaves first:
//!
//! - [`encode_chunk`] and [`decode_chunk`] convert as much of a buffer as
//!   they can and report an [`Outcome`] with exact cursor positions.
//! - [`Utf8Codec`] converts a whole buffer in one pass and turns anything
//!   short of full success into a [`ConversionError`].
//! - [`WideString`] holds internal text and converts it to and from `String`.
//!
//! Internal text is made of [`CodeUnit`]s: `u32` (one unit per scalar) or
//! `u16` (astral scalars as surrogate pairs).

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod codec;
mod error;
mod options;
mod outcome;
mod text;
mod transcoder;
mod unit;
mod utf8;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod tests;

pub use codec::Utf8Codec;
pub use error::ConversionError;
pub use options::{CodecOptions, MalformedInput, ScratchSizing};
pub use outcome::{ConversionState, Fault, MalformedKind, Outcome, Shortfall};
pub use text::WideString;
pub use transcoder::{decode_chunk, encode_chunk};
pub use unit::{CodeUnit, WChar};
pub use utf8::{MAX_SCALAR, MAX_UTF8_WIDTH, is_scalar, utf8_width};
