use alloc::string::String;

use bytes::{BufMut, BytesMut};
use log::trace;

use crate::decoder::Decoder;
use crate::encoder::Encoder;

//      value       | char      | code
//      ------------+-----------+-----------
//      00 - 19     | A - Z     | 41 - 5a
//      1a - 33     | a - z     | 61 - 7a
//      34 - 3d     | 0 - 9     | 30 - 39
//      3e          | +         | 2b
//      3f          | /         | 2f
//      --          | =         | 3d
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: char = '=';
const INVALID: u8 = 0xff;

const DECODE_TABLE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Standard Base64 (RFC 4648 alphabet, `=` padding).
///
/// Encoding always pads to a multiple of four characters. Decoding is
/// lenient: characters outside the alphabet, including stray `=` inside the
/// input, count as zero bits, and the output length is derived from the
/// input length minus its trailing padding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Base64Codec;

impl Base64Codec {
    /// Length of the encoding of `len` bytes: `4 * ceil(len / 3)`.
    pub const fn encoded_len(len: usize) -> usize {
        4 * len.div_ceil(3)
    }
}

fn bits_to_char(bits: u8) -> char {
    ALPHABET[usize::from(bits & 0x3f)] as char
}

/// Maps a UTF-16 code unit to its 6-bit value, or `None` outside the alphabet.
fn char_to_bits(unit: u16) -> Option<u8> {
    match DECODE_TABLE.get(usize::from(unit)) {
        Some(&bits) if bits != INVALID => Some(bits),
        _ => None,
    }
}

fn padding(src: &str) -> usize {
    src.chars().rev().take_while(|&c| c == PAD).count()
}

impl Encoder for Base64Codec {
    fn encode(&self, src: &[u8], dst: &mut String) {
        dst.reserve(Self::encoded_len(src.len()));

        for group in src.chunks(3) {
            let a = group[0];
            let b = group.get(1).copied().unwrap_or(0);
            let c = group.get(2).copied().unwrap_or(0);

            //          6       12       18       24
            // +--------+--------+--------+--------+
            // | aaaaaa | aabbbb | bbbbcc | cccccc |
            // +--------+--------+--------+--------+
            dst.push(bits_to_char(a >> 2));
            dst.push(bits_to_char((a & 0x03) << 4 | b >> 4));
            dst.push(if group.len() > 1 {
                bits_to_char((b & 0x0f) << 2 | c >> 6)
            } else {
                PAD
            });
            dst.push(if group.len() > 2 {
                bits_to_char(c & 0x3f)
            } else {
                PAD
            });
        }
    }

    fn encode_len(&self, src: &[u8]) -> Option<usize> {
        Some(Self::encoded_len(src.len()))
    }
}

impl Decoder for Base64Codec {
    fn decode(&self, src: &str, dst: &mut BytesMut) {
        let len = self.decode_len(src);
        dst.reserve(len);

        let mut units = src.encode_utf16();
        let mut written = 0;
        let mut invalid = 0usize;

        while written < len {
            let mut quad = [0u8; 4];
            for slot in quad.iter_mut() {
                *slot = match units.next() {
                    Some(unit) => match char_to_bits(unit) {
                        Some(bits) => bits,
                        None => {
                            if unit != PAD as u16 {
                                invalid += 1;
                            }
                            0
                        }
                    },
                    None => 0,
                };
            }
            let [a, b, c, d] = quad;

            //            8         16         24
            // +----------+----------+----------+
            // | aaaaaabb | bbbbcccc | ccdddddd |
            // +----------+----------+----------+
            let group = [a << 2 | b >> 4, (b & 0x0f) << 4 | c >> 2, (c & 0x03) << 6 | d];
            let n = (len - written).min(group.len());
            dst.put_slice(&group[..n]);
            written += n;
        }

        if invalid > 0 {
            trace!("base64: {invalid} characters outside the alphabet decoded as zero bits");
        }
    }

    fn decode_len(&self, src: &str) -> usize {
        let units = src.encode_utf16().count();
        (units * 3 / 4).saturating_sub(padding(src))
    }
}
