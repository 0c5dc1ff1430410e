#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use widetext::{
    CodecOptions, ConversionState, MalformedInput, Outcome, Utf8Codec, WideString, decode_chunk,
    encode_chunk,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    bytes: &'a [u8],
    units: Vec<u32>,
    out_len: u8,
}

fuzz_target!(|input: Input<'_>| {
    // Strict decoding accepts exactly what the standard library accepts.
    let strict = WideString::<u16>::from_utf8(input.bytes);
    match core::str::from_utf8(input.bytes) {
        Ok(s) => assert_eq!(strict.unwrap().to_utf8().unwrap(), s),
        Err(e) => assert_eq!(strict.unwrap_err().offset(), e.valid_up_to()),
    }

    // Lossy decoding matches the standard library's substitution.
    let lossy = Utf8Codec::new(CodecOptions {
        malformed: MalformedInput::Replace,
        ..Default::default()
    });
    let mut units: Vec<u32> = Vec::new();
    lossy.from_bytes(input.bytes, &mut units).unwrap();
    let text: String = units.iter().map(|&u| char::from_u32(u).unwrap()).collect();
    assert_eq!(text, String::from_utf8_lossy(input.bytes));

    // Arbitrary units into an arbitrarily small buffer: cursors stay in
    // bounds and whatever was written is valid UTF-8.
    let mut out = vec![0u8; usize::from(input.out_len)];
    let mut state = ConversionState::new();
    let (outcome, read, written) = encode_chunk(&mut state, &input.units, &mut out);
    assert!(read <= input.units.len() && written <= out.len());
    assert!(core::str::from_utf8(&out[..written]).is_ok());
    if outcome == Outcome::Ok {
        assert_eq!(read, input.units.len());
    }

    let mut decoded = vec![0u32; written];
    state.reset();
    let (outcome, _, produced) = decode_chunk(&mut state, &out[..written], &mut decoded);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(&decoded[..produced], &input.units[..read]);
});
