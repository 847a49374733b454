mod base64;
mod hex;
mod utf8;

pub use self::base64::Base64Codec;
pub use self::hex::HexCodec;
pub use self::utf8::{Utf8Codec, REPLACEMENT_CHARACTER};
