#![allow(missing_docs)]

use insta::assert_snapshot;
use rstest::rstest;
use widetext::{
    CodecOptions, ConversionError, MalformedInput, MalformedKind, ScratchSizing, Utf8Codec,
    WideString,
};

#[rstest]
#[case("")]
#[case("plain ascii")]
#[case("ñandú €5 — 😀🎉")]
#[case("\u{0}\u{7F}\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}\u{10FFFF}")]
fn default_width_round_trips(#[case] text: &str) {
    let s: WideString = text.parse().unwrap();
    assert_eq!(s.to_utf8().unwrap(), text);
    assert_eq!(s.to_string(), text);
}

#[test]
fn narrow_and_wide_lengths_differ_for_astral_text() {
    let narrow = WideString::<u16>::from_utf8("a😀").unwrap();
    let wide = WideString::<u32>::from_utf8("a😀").unwrap();
    assert_eq!(narrow.as_units(), &[0x61, 0xD83D, 0xDE00]);
    assert_eq!(wide.as_units(), &[0x61, 0x1F600]);
}

#[test]
fn malformed_input_messages() {
    let overlong = WideString::<u32>::from_utf8(b"ok\xC0\x80").unwrap_err();
    assert_snapshot!(overlong, @"malformed UTF-8 (overlong encoding) at byte 2");

    let surrogate = WideString::<u32>::from_utf8(b"\xED\xA0\x80").unwrap_err();
    assert_snapshot!(surrogate, @"malformed UTF-8 (encoded surrogate) at byte 0");

    let stray = WideString::<u16>::from_utf8(b"abc\x80").unwrap_err();
    assert_snapshot!(stray, @"malformed UTF-8 (unexpected continuation byte) at byte 3");

    let truncated = WideString::<u32>::from_utf8(b"\xE2\x82").unwrap_err();
    assert_snapshot!(truncated, @"truncated UTF-8 sequence at byte 0: 2 of 3 bytes present");
}

#[test]
fn invalid_code_point_messages() {
    let lone = WideString::from_units(vec![0x61_u32, 0xD800]).to_utf8().unwrap_err();
    assert_snapshot!(lone, @"invalid code point 0xD800 at unit 1");

    let too_big = WideString::from_units(vec![0x11_0000_u32]).to_utf8().unwrap_err();
    assert_snapshot!(too_big, @"invalid code point 0x110000 at unit 0");
}

#[test]
fn capacity_message() {
    let text: Vec<u32> = "€€".chars().map(u32::from).collect();
    let mut out = [0u8; 4];
    let err = Utf8Codec::default().to_bytes(&text, &mut out).unwrap_err();
    assert_snapshot!(err, @"output buffer of 4 full after consuming 1 and producing 3");
}

#[test]
fn caller_can_tell_capacity_from_corruption() {
    let codec = Utf8Codec::default();
    let mut out = [0u8; 2];
    let small = codec.to_bytes(&[0x20AC_u32], &mut out).unwrap_err();
    let corrupt = codec.to_bytes(&[0xDFFF_u32], &mut out).unwrap_err();
    assert!(small.is_capacity());
    assert!(!corrupt.is_capacity());
}

#[test]
fn set_utf8_with_replacement() {
    let codec = Utf8Codec::new(CodecOptions {
        malformed: MalformedInput::Replace,
        scratch: ScratchSizing::Exact,
    });
    let mut s = WideString::<u16>::new();
    s.set_utf8_with(b"caf\xC3", &codec).unwrap();
    assert_eq!(s.to_utf8_with(&codec).unwrap(), "caf\u{FFFD}");
}

#[test]
fn failed_set_keeps_previous_text() {
    let mut s = WideString::<u32>::from("before");
    assert_eq!(
        s.set_utf8(b"\xF5\x80\x80\x80"),
        Err(ConversionError::MalformedSequence {
            kind: MalformedKind::OutOfRange,
            len: 1,
            offset: 0,
        })
    );
    assert_eq!(s.to_utf8().unwrap(), "before");
}
