/// Configuration for [`Utf8Codec`](crate::Utf8Codec).
///
/// # Default
///
/// Malformed input is rejected and scratch buffers are sized for the worst
/// case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// What decoding does with bytes that are not UTF-8.
    ///
    /// # Default
    ///
    /// [`MalformedInput::Reject`]
    pub malformed: MalformedInput,

    /// How the scratch buffer for encoding a whole string is sized.
    ///
    /// # Default
    ///
    /// [`ScratchSizing::WorstCase`]
    pub scratch: ScratchSizing,
}

/// Handling of malformed or truncated UTF-8 while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedInput {
    /// Fail the conversion at the first malformed or truncated sequence.
    #[default]
    Reject,
    /// Replace each maximal ill-formed subpart, and a truncated sequence at
    /// the end of the input, with U+FFFD REPLACEMENT CHARACTER.
    ///
    /// This yields the same text as `String::from_utf8_lossy`.
    Replace,
}

/// Sizing of the UTF-8 scratch buffer used to encode a whole string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScratchSizing {
    /// Four bytes per unit plus one. Never needs a pre-scan; wastes up to
    /// three quarters of the buffer on ASCII text.
    #[default]
    WorstCase,
    /// Pre-scan the text with the width table and allocate exactly what the
    /// encoding needs.
    Exact,
}
