//! Offset-based typed integer access over a byte region.
//!
//! Every width from 8 to 64 bits, signed and unsigned, can be read from or
//! written to any in-bounds offset of a byte slice in either byte order.
//! 64-bit values travel as `u64`/`i64`, so no precision is lost.

use crate::error::{BufferError, Result};

/// Byte order of a multi-byte integer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Endian {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width integer that can be stored in a byte region.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64` and `i64`
/// only.
pub trait Integer: sealed::Sealed + Copy {
    /// Width in bytes.
    const WIDTH: usize;

    /// Decodes a value from exactly `WIDTH` bytes.
    fn load(bytes: &[u8], endian: Endian) -> Self;

    /// Encodes the value into exactly `WIDTH` bytes.
    fn store(self, bytes: &mut [u8], endian: Endian);
}

macro_rules! impl_integer {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Integer for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                #[inline]
                fn load(bytes: &[u8], endian: Endian) -> Self {
                    // Callers hand over a window of exactly WIDTH bytes.
                    let Ok(raw) = <[u8; core::mem::size_of::<$ty>()]>::try_from(bytes) else {
                        unreachable!()
                    };
                    match endian {
                        Endian::Big => <$ty>::from_be_bytes(raw),
                        Endian::Little => <$ty>::from_le_bytes(raw),
                    }
                }

                #[inline]
                fn store(self, bytes: &mut [u8], endian: Endian) {
                    let raw = match endian {
                        Endian::Big => self.to_be_bytes(),
                        Endian::Little => self.to_le_bytes(),
                    };
                    bytes.copy_from_slice(&raw);
                }
            }
        )+
    };
}

impl_integer!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Validates that `[offset, offset + width)` lies inside a region of `len`
/// bytes and returns the end of the window.
fn check_window(offset: usize, width: usize, len: usize) -> Result<usize> {
    if len < width {
        return Err(BufferError::OutOfBounds { name: "offset" });
    }
    let max = len - width;
    if offset > max {
        return Err(BufferError::OutOfRange {
            name: "offset",
            min: 0,
            max: Some(max),
            received: offset,
        });
    }
    Ok(offset + width)
}

/// Reads a `T` stored at `offset`.
pub fn read_int<T: Integer>(bytes: &[u8], offset: usize, endian: Endian) -> Result<T> {
    let end = check_window(offset, T::WIDTH, bytes.len())?;
    Ok(T::load(&bytes[offset..end], endian))
}

/// Writes `value` at `offset` and returns the offset just past it.
pub fn write_int<T: Integer>(
    bytes: &mut [u8],
    value: T,
    offset: usize,
    endian: Endian,
) -> Result<usize> {
    let end = check_window(offset, T::WIDTH, bytes.len())?;
    value.store(&mut bytes[offset..end], endian);
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(i16::WIDTH, 2);
        assert_eq!(u32::WIDTH, 4);
        assert_eq!(i64::WIDTH, 8);
    }

    #[test]
    fn test_byte_order() {
        let mut bytes = [0u8; 4];
        assert_eq!(write_int(&mut bytes, 0x1234u16, 1, Endian::Big), Ok(3));
        assert_eq!(bytes, [0, 0x12, 0x34, 0]);
        assert_eq!(write_int(&mut bytes, 0x1234u16, 1, Endian::Little), Ok(3));
        assert_eq!(bytes, [0, 0x34, 0x12, 0]);

        assert_eq!(read_int::<u16>(&bytes, 1, Endian::Little), Ok(0x1234));
        assert_eq!(read_int::<u16>(&bytes, 1, Endian::Big), Ok(0x3412));
    }

    #[test]
    fn test_signed_reads_twos_complement() {
        let bytes = [0xff, 0xfe];
        assert_eq!(read_int::<i8>(&bytes, 0, Endian::Big), Ok(-1));
        assert_eq!(read_int::<i16>(&bytes, 0, Endian::Big), Ok(-2));
        assert_eq!(read_int::<i16>(&bytes, 0, Endian::Little), Ok(-257));
        assert_eq!(read_int::<u16>(&bytes, 0, Endian::Big), Ok(0xfffe));
    }

    #[test]
    fn test_full_u64_precision() {
        let mut bytes = [0u8; 8];
        write_int(&mut bytes, u64::MAX - 1, 0, Endian::Big).unwrap();
        assert_eq!(read_int::<u64>(&bytes, 0, Endian::Big), Ok(u64::MAX - 1));
        write_int(&mut bytes, i64::MIN + 1, 0, Endian::Little).unwrap();
        assert_eq!(read_int::<i64>(&bytes, 0, Endian::Little), Ok(i64::MIN + 1));
    }

    #[test]
    fn test_window_bounds() {
        let bytes = [0u8; 6];
        assert_eq!(read_int::<u32>(&bytes, 2, Endian::Big), Ok(0));
        assert_eq!(
            read_int::<u32>(&bytes, 3, Endian::Big),
            Err(BufferError::OutOfRange {
                name: "offset",
                min: 0,
                max: Some(2),
                received: 3,
            })
        );
        assert_eq!(
            read_int::<u64>(&bytes, 0, Endian::Big),
            Err(BufferError::OutOfBounds { name: "offset" })
        );
        assert_eq!(
            read_int::<u8>(&[], 0, Endian::Big),
            Err(BufferError::OutOfBounds { name: "offset" })
        );
    }

    #[test]
    fn test_offset_overflow_is_range_error() {
        let mut bytes = [0u8; 4];
        let err = write_int(&mut bytes, 1u16, usize::MAX, Endian::Big).unwrap_err();
        assert!(err.is_range_error());
    }
}
