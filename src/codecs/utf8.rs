use alloc::string::String;

use bytes::{BufMut, BytesMut};
use log::trace;

use crate::decoder::Decoder;
use crate::encoder::Encoder;

/// Substituted for every malformed or truncated sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// UTF-8 text.
///
/// Rendering bytes as text never fails: a lead byte in `0x80..=0xC1` or
/// `0xF5..=0xFF`, or a sequence cut short by the end of the input, becomes
/// one [`REPLACEMENT_CHARACTER`] and scanning resumes at the next byte.
/// Continuation bytes are not validated; only their low six bits are used.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Utf8Codec;

//    byte layout                             | bits  | max value
//    ----------------------------------------+-------+----------
//                                  0aaaaaaa  | 7     | U+007F
//                        110aaaaa  10bbbbbb  | 11    | U+07FF
//              1110aaaa  10bbbbbb  10cccccc  | 16    | U+FFFF
//    11110aaa  10bbbbbb  10cccccc  10dddddd  | 21    | U+10FFFF

#[inline]
fn continuation(byte: u8) -> u32 {
    u32::from(byte & 0x3f)
}

/// Writes the 1 to 4 byte pattern for `cp`.
///
/// Surrogate code points are written with the three byte pattern like any
/// other value up to U+FFFF.
fn put_code_point(cp: u32, dst: &mut BytesMut) {
    match cp {
        0..=0x7f => dst.put_u8(cp as u8),
        0x80..=0x7ff => dst.put_slice(&[0xc0 | (cp >> 6) as u8, 0x80 | (cp & 0x3f) as u8]),
        0x800..=0xffff => dst.put_slice(&[
            0xe0 | (cp >> 12) as u8,
            0x80 | ((cp >> 6) & 0x3f) as u8,
            0x80 | (cp & 0x3f) as u8,
        ]),
        _ => dst.put_slice(&[
            0xf0 | ((cp >> 18) & 0x07) as u8,
            0x80 | ((cp >> 12) & 0x3f) as u8,
            0x80 | ((cp >> 6) & 0x3f) as u8,
            0x80 | (cp & 0x3f) as u8,
        ]),
    }
}

impl Utf8Codec {
    /// Encodes UTF-16 code units, joining surrogate pairs into a single
    /// code point first. An unpaired surrogate is written as its own three
    /// byte sequence.
    pub fn decode_utf16(&self, units: &[u16], dst: &mut BytesMut) {
        dst.reserve(units.len());
        let mut ofs = 0;
        while ofs < units.len() {
            let unit = units[ofs];
            ofs += 1;

            let mut cp = u32::from(unit);
            if (0xd800..0xdc00).contains(&unit) {
                if let Some(&low) = units.get(ofs).filter(|low| (0xdc00..0xe000).contains(*low)) {
                    cp = 0x10000 + ((cp - 0xd800) << 10) + (u32::from(low) - 0xdc00);
                    ofs += 1;
                }
            }
            put_code_point(cp, dst);
        }
    }
}

impl Encoder for Utf8Codec {
    fn encode(&self, src: &[u8], dst: &mut String) {
        dst.reserve(src.len());

        let len = src.len();
        let mut ofs = 0;
        let mut replaced = 0usize;

        while ofs < len {
            let b = src[ofs];
            ofs += 1;
            let remaining = len - ofs;

            let cp = match b {
                0x00..=0x7f => Some(u32::from(b)),
                0xc2..=0xdf if remaining >= 1 => {
                    let cp = u32::from(b & 0x1f) << 6 | continuation(src[ofs]);
                    ofs += 1;
                    Some(cp)
                }
                0xe0..=0xef if remaining >= 2 => {
                    let cp = u32::from(b & 0x0f) << 12
                        | continuation(src[ofs]) << 6
                        | continuation(src[ofs + 1]);
                    ofs += 2;
                    Some(cp)
                }
                0xf0..=0xf4 if remaining >= 3 => {
                    let cp = u32::from(b & 0x07) << 18
                        | continuation(src[ofs]) << 12
                        | continuation(src[ofs + 1]) << 6
                        | continuation(src[ofs + 2]);
                    ofs += 3;
                    Some(cp)
                }
                _ => None,
            };

            // Surrogates and values past U+10FFFF have no `char`.
            match cp.and_then(char::from_u32) {
                Some(c) => dst.push(c),
                None => {
                    replaced += 1;
                    dst.push(REPLACEMENT_CHARACTER);
                }
            }
        }

        if replaced > 0 {
            trace!("utf8: {replaced} malformed sequences replaced with U+FFFD");
        }
    }
}

impl Decoder for Utf8Codec {
    fn decode(&self, src: &str, dst: &mut BytesMut) {
        // A `str` is already UTF-8 with surrogate pairs joined.
        dst.put_slice(src.as_bytes());
    }

    fn decode_len(&self, src: &str) -> usize {
        src.len()
    }
}
