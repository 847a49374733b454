//! A fixed-length byte buffer with Base64, hex and UTF-8 conversions and
//! typed integer access in both byte orders.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

mod buffer;
mod decoder;
mod encoder;
mod encoding;
mod error;

pub mod codecs;
pub mod integer;

pub use self::buffer::{BufferStorage, ByteBuffer};
pub use self::decoder::Decoder;
pub use self::encoder::Encoder;
pub use self::encoding::Encoding;
pub use self::error::{BufferError, Result};
pub use self::integer::{Endian, Integer};

#[cfg(test)]
mod tests;
