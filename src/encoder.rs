use alloc::string::String;

/// Renders bytes as text.
///
/// Encoders are stateless and infallible: every byte sequence has a textual
/// form, even if that form substitutes replacement characters.
pub trait Encoder {
    /// Appends the text form of `src` to `dst`.
    fn encode(&self, src: &[u8], dst: &mut String);

    /// Returns the number of UTF-8 bytes `encode` appends for `src`, if it
    /// can be computed without encoding.
    fn encode_len(&self, _src: &[u8]) -> Option<usize> {
        None
    }
}
