use alloc::string::String;

use bytes::{BufMut, BytesMut};
use log::trace;

use crate::decoder::Decoder;
use crate::encoder::Encoder;

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hexadecimal, two characters per byte.
///
/// Decoding accepts either case; anything else is read as a zero nibble and
/// a dangling final character is ignored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct HexCodec;

fn nibble_to_char(nibble: u8) -> char {
    HEX_CHARS[usize::from(nibble & 0x0f)] as char
}

//      char      | code
//      ----------+-----------
//      0 - 9     | 30 - 39
//      A - F     | 41 - 46
//      a - f     | 61 - 66
fn char_to_nibble(unit: u16) -> Option<u8> {
    match u8::try_from(unit).ok()? {
        c @ b'0'..=b'9' => Some(c - b'0'),
        c @ b'A'..=b'F' => Some(c - b'A' + 10),
        c @ b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

impl Encoder for HexCodec {
    fn encode(&self, src: &[u8], dst: &mut String) {
        dst.reserve(src.len() * 2);
        for &byte in src {
            dst.push(nibble_to_char(byte >> 4));
            dst.push(nibble_to_char(byte));
        }
    }

    fn encode_len(&self, src: &[u8]) -> Option<usize> {
        Some(src.len() * 2)
    }
}

impl Decoder for HexCodec {
    fn decode(&self, src: &str, dst: &mut BytesMut) {
        let len = self.decode_len(src);
        dst.reserve(len);

        let mut units = src.encode_utf16();
        let mut invalid = 0usize;
        let mut nibble = |unit: Option<u16>| {
            let unit = unit.unwrap_or(0);
            char_to_nibble(unit).unwrap_or_else(|| {
                invalid += 1;
                0
            })
        };
        for _ in 0..len {
            let hi = nibble(units.next());
            let lo = nibble(units.next());
            dst.put_u8(hi << 4 | lo);
        }

        if invalid > 0 {
            trace!("hex: {invalid} non-hex characters decoded as zero nibbles");
        }
    }

    fn decode_len(&self, src: &str) -> usize {
        src.encode_utf16().count() / 2
    }
}
