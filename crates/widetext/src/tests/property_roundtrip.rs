use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::arbitrary::ScalarText;
use crate::{CodecOptions, MalformedInput, ScratchSizing, Utf8Codec, WideString};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: UTF-8 text survives decoding into either unit width and
/// encoding back, whatever the options. Replacement never fires on valid
/// input.
#[test]
fn utf8_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: ScalarText, malformed: MalformedInput, scratch: ScratchSizing) -> bool {
        let codec = Utf8Codec::new(CodecOptions { malformed, scratch });

        let mut wide = WideString::<u32>::new();
        let mut narrow = WideString::<u16>::new();
        if wide.set_utf8_with(&text.0, &codec).is_err()
            || narrow.set_utf8_with(&text.0, &codec).is_err()
        {
            return false;
        }

        wide.as_units() == text.utf32()
            && narrow.as_units() == text.utf16()
            && wide.to_utf8_with(&codec).as_ref() == Ok(&text.0)
            && narrow.to_utf8_with(&codec).as_ref() == Ok(&text.0)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(ScalarText, MalformedInput, ScratchSizing) -> bool);
}

/// Property: for internal text made of valid scalars,
/// `from_bytes(to_bytes(t)) == t`.
#[test]
fn internal_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: WideString<u32>) -> bool {
        let codec = Utf8Codec::default();
        let mut bytes = alloc::vec![0u8; Utf8Codec::encoded_len(text.as_units())];
        let Ok(written) = codec.to_bytes(text.as_units(), &mut bytes) else {
            return false;
        };
        let mut units: Vec<u32> = Vec::new();
        codec.from_bytes(&bytes[..written], &mut units) == Ok(written) && units == text.as_units()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(WideString<u32>) -> bool);
}
