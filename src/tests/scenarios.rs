use crate::{BufferError, ByteBuffer, Encoding};

const HELLO_WORLD: [u8; 11] = [
    0x68, 0x65, 0x6c, 0x6c, 0x6f, 0x20, 0x77, 0x6f, 0x72, 0x6c, 0x64,
];

#[test]
fn test_hello_world_to_base64() {
    let buffer = ByteBuffer::from(HELLO_WORLD);
    assert_eq!(buffer.to_text(Encoding::Base64), "aGVsbG8gd29ybGQ=");
}

#[test]
fn test_hello_world_from_base64() {
    let buffer = ByteBuffer::from_text("aGVsbG8gd29ybGQ=", Encoding::Base64);
    assert_eq!(buffer, HELLO_WORLD);
}

#[test]
fn test_utf8_is_the_default() {
    let buffer = ByteBuffer::from_text("hello world", Encoding::default());
    assert_eq!(buffer, HELLO_WORLD);
    assert_eq!(ByteBuffer::from("hello world"), HELLO_WORLD);
    assert_eq!(buffer.to_string(), "hello world");
}

#[test]
fn test_copy_into_larger_target() {
    let source = ByteBuffer::from([0x12, 0x34, 0x56, 0x78, 0x9a]);
    let mut target = ByteBuffer::alloc(8);
    source.copy(&mut target, 2, 0, None).unwrap();
    assert_eq!(target, [0, 0, 0x12, 0x34, 0x56, 0x78, 0x9a, 0]);
}

#[test]
fn test_concat_with_short_length() {
    let joined = ByteBuffer::concat(
        [
            ByteBuffer::from([0x12, 0x34]),
            ByteBuffer::alloc(0),
            ByteBuffer::from([0x56, 0x78, 0x9a]),
            ByteBuffer::from([0xbc]),
        ],
        Some(3),
    );
    assert_eq!(joined, [0x12, 0x34, 0x56]);
}

#[test]
fn test_write_u32_be_at_offsets() {
    let mut buffer = ByteBuffer::alloc(6);
    assert_eq!(buffer.write_u32_be(0x12345678, 2), Ok(6));
    assert_eq!(buffer, [0, 0, 0x12, 0x34, 0x56, 0x78]);

    let err = buffer.write_u32_be(0x12345678, 3).unwrap_err();
    assert!(err.is_range_error());
}

#[test]
fn test_copy_source_start_past_end() {
    let source = ByteBuffer::from([0x12, 0x34, 0x56, 0x78, 0x9a]);
    let mut target = ByteBuffer::alloc(8);
    let err = source.copy(&mut target, 0, 6, None).unwrap_err();
    assert!(matches!(
        err,
        BufferError::OutOfRange {
            name: "source_start",
            received: 6,
            ..
        }
    ));
}

#[test]
fn test_copy_unordered_offsets() {
    let source = ByteBuffer::from([0x12, 0x34, 0x56, 0x78, 0x9a]);
    let mut target = ByteBuffer::alloc(8);
    assert_eq!(source.copy(&mut target, 1, 4, Some(2)), Ok(0));
    assert_eq!(target, [0; 8]);
}

#[test]
fn test_unknown_encoding_names() {
    assert!(matches!(
        ByteBuffer::from_text_named("abc", "ascii"),
        Err(BufferError::UnsupportedEncoding { .. })
    ));
    assert!(ByteBuffer::from(HELLO_WORLD).to_text_named("UTF16LE").is_err());
}
