use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use bytes::{Bytes, BytesMut};
use log::debug;

use crate::codecs::Utf8Codec;
use crate::encoder::Encoder;
use crate::encoding::Encoding;
use crate::error::{BufferError, Result};
use crate::integer::{self, Endian, Integer};

/// A fixed-length, mutable run of bytes.
///
/// The length is set at construction and never changes. A buffer either owns
/// its bytes or is a view borrowing a region of another buffer (or of any
/// `&mut [u8]`); writes through a view land in the parent's storage.
pub struct ByteBuffer<'a> {
    storage: BufferStorage<'a>,
}

/// Owned or borrowed backing bytes of a [`ByteBuffer`].
#[derive(Debug)]
pub enum BufferStorage<'a> {
    Owned(BytesMut),
    Borrowed(&'a mut [u8]),
}

impl core::ops::Deref for BufferStorage<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(bytes) => &bytes[..],
            Self::Borrowed(slice) => slice,
        }
    }
}

impl core::ops::DerefMut for BufferStorage<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Owned(bytes) => &mut bytes[..],
            Self::Borrowed(slice) => slice,
        }
    }
}

impl<'a> ByteBuffer<'a> {
    pub fn from_storage(storage: BufferStorage<'a>) -> Self {
        Self { storage }
    }

    /// Wraps borrowed memory as a view.
    pub fn view(slice: &'a mut [u8]) -> Self {
        Self::from_storage(BufferStorage::Borrowed(slice))
    }

    /// Returns `true` if this buffer borrows its bytes.
    pub fn is_view(&self) -> bool {
        matches!(self.storage, BufferStorage::Borrowed(_))
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Returns a view over `[start, end)`, both clamped to the buffer length.
    /// An `end` before `start` gives an empty view.
    pub fn subarray(&mut self, start: usize, end: usize) -> ByteBuffer<'_> {
        let len = self.len();
        let end = end.min(len);
        let start = start.min(end);
        ByteBuffer::view(&mut self.storage[start..end])
    }

    /// Sets every byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.storage.fill(value);
    }

    /// Copies an owned snapshot of the bytes, detaching it from any parent.
    pub fn to_owned_buffer(&self) -> ByteBuffer<'static> {
        ByteBuffer::from(self.as_slice())
    }

    /// Converts into immutable [`Bytes`], copying only if this is a view.
    pub fn freeze(self) -> Bytes {
        match self.storage {
            BufferStorage::Owned(bytes) => bytes.freeze(),
            BufferStorage::Borrowed(slice) => Bytes::copy_from_slice(slice),
        }
    }

    /// Renders the bytes as text in `encoding`.
    pub fn to_text(&self, encoding: Encoding) -> String {
        let mut text = String::new();
        encoding.encoder().encode(self.as_slice(), &mut text);
        text
    }

    /// Like [`to_text`](Self::to_text), resolving the encoding by name.
    pub fn to_text_named(&self, encoding: &str) -> Result<String> {
        Ok(self.to_text(encoding.parse()?))
    }

    /// Copies `self[source_start..source_end]` into `target` at
    /// `target_start` and returns the number of bytes copied.
    ///
    /// `source_end` defaults to the buffer length and is clipped to it. The
    /// copy is cut short where `target` ends. Zero bytes are copied, without
    /// error, when `target_start` lies past the end of `target` or when the
    /// effective end does not exceed `source_start`. A `source_start` past
    /// the end of this buffer is an error.
    pub fn copy(
        &self,
        target: &mut ByteBuffer<'_>,
        target_start: usize,
        source_start: usize,
        source_end: Option<usize>,
    ) -> Result<usize> {
        copy_bytes(
            self.as_slice(),
            target.as_mut_slice(),
            target_start,
            source_start,
            source_end.unwrap_or(self.len()),
        )
    }

    /// Lexicographic byte order; a proper prefix sorts first.
    pub fn compare(&self, other: &ByteBuffer<'_>) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }

    /// Reads an integer of type `T` at `offset`.
    pub fn read_int<T: Integer>(&self, offset: usize, endian: Endian) -> Result<T> {
        integer::read_int(self.as_slice(), offset, endian)
    }

    /// Writes `value` at `offset`, returning the offset just past it so
    /// writes can be chained.
    pub fn write_int<T: Integer>(
        &mut self,
        value: T,
        offset: usize,
        endian: Endian,
    ) -> Result<usize> {
        integer::write_int(self.as_mut_slice(), value, offset, endian)
    }
}

impl ByteBuffer<'static> {
    /// Allocates `size` zeroed bytes.
    pub fn alloc(size: usize) -> Self {
        Self::from_storage(BufferStorage::Owned(BytesMut::zeroed(size)))
    }

    /// Decodes `text` in `encoding` into a new buffer.
    pub fn from_text(text: &str, encoding: Encoding) -> Self {
        let mut bytes = BytesMut::new();
        encoding.decoder().decode(text, &mut bytes);
        Self::from(bytes)
    }

    /// Like [`from_text`](Self::from_text), resolving the encoding by name.
    pub fn from_text_named(text: &str, encoding: &str) -> Result<Self> {
        Ok(Self::from_text(text, encoding.parse()?))
    }

    /// Encodes UTF-16 code units as UTF-8, joining surrogate pairs.
    pub fn from_utf16(units: &[u16]) -> Self {
        let mut bytes = BytesMut::new();
        Utf8Codec.decode_utf16(units, &mut bytes);
        Self::from(bytes)
    }

    /// Joins `list` into a new buffer of `length` bytes.
    ///
    /// `length` defaults to the sum of the input lengths. A shorter length
    /// truncates the tail of the input; a longer one leaves the rest zeroed.
    pub fn concat<I, B>(list: I, length: Option<usize>) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let list: Vec<B> = list.into_iter().collect();
        let natural: usize = list.iter().map(|item| item.as_ref().len()).sum();
        let length = length.unwrap_or(natural);
        if length < natural {
            debug!("concat truncating {natural} input bytes to {length}");
        }

        let mut out = Self::alloc(length);
        let mut pos = 0;
        for item in &list {
            let item = item.as_ref();
            pos += copy_clipped(item, out.as_mut_slice(), pos, 0, item.len());
        }
        out
    }
}

/// Validates the copy window and performs the clipped copy.
fn copy_bytes(
    source: &[u8],
    target: &mut [u8],
    target_start: usize,
    source_start: usize,
    source_end: usize,
) -> Result<usize> {
    if target_start > target.len() {
        debug!(
            "copy skipped: target_start {target_start} past target length {}",
            target.len()
        );
        return Ok(0);
    }
    if source_start > source.len() {
        return Err(BufferError::OutOfRange {
            name: "source_start",
            min: 0,
            max: Some(source.len()),
            received: source_start,
        });
    }
    Ok(copy_clipped(source, target, target_start, source_start, source_end))
}

/// Copies whatever part of `source[source_start..source_end]` fits into
/// `target` from `target_start`. Both starts must already be in bounds.
fn copy_clipped(
    source: &[u8],
    target: &mut [u8],
    target_start: usize,
    source_start: usize,
    source_end: usize,
) -> usize {
    let room = target.len() - target_start;
    let end = source_end
        .min(source.len())
        .min(source_start.saturating_add(room));
    if source_start >= end {
        return 0;
    }
    let n = end - source_start;
    target[target_start..target_start + n].copy_from_slice(&source[source_start..end]);
    n
}

macro_rules! typed_access {
    ($($read:ident, $write:ident => $ty:ty, $endian:expr;)+) => {
        impl ByteBuffer<'_> {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $read(&self, offset: usize) -> Result<$ty> {
                    self.read_int(offset, $endian)
                }

                #[doc = concat!("Writes a `", stringify!($ty), "` at `offset` and returns `offset + ", stringify!($ty), "::WIDTH`.")]
                #[inline]
                pub fn $write(&mut self, value: $ty, offset: usize) -> Result<usize> {
                    self.write_int(value, offset, $endian)
                }
            )+
        }
    };
}

typed_access! {
    read_u8, write_u8 => u8, Endian::Big;
    read_i8, write_i8 => i8, Endian::Big;
    read_u16_be, write_u16_be => u16, Endian::Big;
    read_u16_le, write_u16_le => u16, Endian::Little;
    read_i16_be, write_i16_be => i16, Endian::Big;
    read_i16_le, write_i16_le => i16, Endian::Little;
    read_u32_be, write_u32_be => u32, Endian::Big;
    read_u32_le, write_u32_le => u32, Endian::Little;
    read_i32_be, write_i32_be => i32, Endian::Big;
    read_i32_le, write_i32_le => i32, Endian::Little;
    read_u64_be, write_u64_be => u64, Endian::Big;
    read_u64_le, write_u64_le => u64, Endian::Little;
    read_i64_be, write_i64_be => i64, Endian::Big;
    read_i64_le, write_i64_le => i64, Endian::Little;
}

impl core::ops::Deref for ByteBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

impl core::ops::DerefMut for ByteBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.storage
    }
}

impl AsRef<[u8]> for ByteBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for ByteBuffer<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl From<BytesMut> for ByteBuffer<'static> {
    fn from(bytes: BytesMut) -> Self {
        Self::from_storage(BufferStorage::Owned(bytes))
    }
}

impl From<&[u8]> for ByteBuffer<'static> {
    fn from(bytes: &[u8]) -> Self {
        Self::from(BytesMut::from(bytes))
    }
}

impl<const N: usize> From<[u8; N]> for ByteBuffer<'static> {
    fn from(bytes: [u8; N]) -> Self {
        Self::from(&bytes[..])
    }
}

impl From<Vec<u8>> for ByteBuffer<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(BytesMut::from(&bytes[..]))
    }
}

impl From<&Bytes> for ByteBuffer<'static> {
    fn from(bytes: &Bytes) -> Self {
        Self::from(&bytes[..])
    }
}

impl From<&str> for ByteBuffer<'static> {
    fn from(text: &str) -> Self {
        Self::from_text(text, Encoding::Utf8)
    }
}

impl PartialEq<ByteBuffer<'_>> for ByteBuffer<'_> {
    fn eq(&self, other: &ByteBuffer<'_>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer<'_> {}

impl PartialEq<[u8]> for ByteBuffer<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for ByteBuffer<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other
    }
}

impl PartialOrd for ByteBuffer<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteBuffer<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for ByteBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<ByteBuffer")?;
        for byte in self.as_slice() {
            write!(f, " {byte:02x}")?;
        }
        f.write_str(">")
    }
}

/// Renders the bytes as UTF-8 text.
impl fmt::Display for ByteBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(Encoding::Utf8))
    }
}
