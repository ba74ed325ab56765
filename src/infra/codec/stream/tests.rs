//! Cursor behaviour of `BitStream`: peek/read/remaining/extend.
use super::*;

#[test]
/// Sequential reads advance the cursor and consume exactly what was asked.
fn test_read_sequence() {
    let mut stream = BitStream::from_bytes(&[0x12, 0x34]);
    assert_eq!(stream.read(8).unwrap().to_int(), 0x12);
    assert_eq!(stream.read(8).unwrap().to_int(), 0x34);
    assert_eq!(stream.remaining(), 0);
}

#[test]
/// `peek` never advances the cursor.
fn test_peek_does_not_advance() {
    let mut stream = BitStream::from_bytes(&[0xAB]);
    assert_eq!(stream.peek(4).unwrap().to_int(), 0b1010);
    assert_eq!(stream.peek(4).unwrap().to_int(), 0b1010);
    assert_eq!(stream.read(4).unwrap().to_int(), 0b1010);
    assert_eq!(stream.read(4).unwrap().to_int(), 0b1011);
}

#[test]
/// Reading past the end fails with `Eof` and leaves the cursor unmoved.
fn test_read_past_end() {
    let mut stream = BitStream::from_bytes(&[0xFF]);
    assert!(matches!(
        stream.read(9),
        Err(Error::Eof {
            asked: 9,
            available: 8
        })
    ));
    assert_eq!(stream.remaining(), 8);
}

#[test]
/// Non byte-aligned reads cross byte boundaries correctly, MSB first.
fn test_read_non_aligned() {
    let mut stream = BitStream::from_bytes(&[0b10101111, 0b11111010]);
    assert_eq!(stream.read(4).unwrap().to_int(), 0b1010);
    assert_eq!(stream.read(8).unwrap().to_int(), 0b11111111);
    assert_eq!(stream.read(4).unwrap().to_int(), 0b1010);
}

#[test]
/// `extend` appends bits to the unconsumed tail, for transports that
/// deliver a frame's bytes in pieces.
fn test_extend() {
    let mut stream = BitStream::from_bytes(&[0x12]);
    stream.read(4).unwrap();
    stream.extend(&Bits::from_bytes(&[0x34]));
    assert_eq!(stream.remaining(), 12);
    assert_eq!(stream.read(4).unwrap().to_int(), 0b0010);
    assert_eq!(stream.read(8).unwrap().to_int(), 0x34);
}

#[test]
/// `compact` discards consumed bits and resets the cursor to zero.
fn test_compact() {
    let mut stream = BitStream::from_bytes(&[0x12, 0x34]);
    stream.read(8).unwrap();
    stream.compact();
    assert_eq!(stream.position(), 0);
    assert_eq!(stream.remaining(), 8);
    assert_eq!(stream.read(8).unwrap().to_int(), 0x34);
}
