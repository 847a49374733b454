use bytes::BytesMut;

/// Parses text back into bytes.
///
/// Decoding is total: characters that carry no meaning for the codec
/// contribute zero bits instead of failing.
pub trait Decoder {
    /// Appends the bytes `src` decodes to onto `dst`.
    fn decode(&self, src: &str, dst: &mut BytesMut);

    /// Returns the number of bytes `decode` appends for `src`.
    fn decode_len(&self, src: &str) -> usize;
}
