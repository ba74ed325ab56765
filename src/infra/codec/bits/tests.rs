//! Exhaustive test suite for `Bits` construction, conversion and slicing.
use super::*;

#[test]
/// `from_int`/`to_int` round trip at a handful of widths.
fn test_int_roundtrip() {
    assert_eq!(Bits::from_int(0b101, 3).unwrap().to_int(), 0b101);
    assert_eq!(Bits::from_int(0, 1).unwrap().to_int(), 0);
    assert_eq!(Bits::from_int(0xFF, 8).unwrap().to_int(), 0xFF);
    assert_eq!(Bits::from_int(u64::MAX, 64).unwrap().to_int(), u64::MAX);
}

#[test]
/// Most significant bit goes first, so a 3-bit `0b101` reads back as `1,0,1`.
fn test_msb_first_layout() {
    let bits = Bits::from_int(0b101, 3).unwrap();
    assert_eq!(bits.len(), 3);
    assert!(bits[0]);
    assert!(!bits[1]);
    assert!(bits[2]);
}

#[test]
/// A value too large for its declared width is rejected.
fn test_from_int_overflow() {
    assert!(matches!(
        Bits::from_int(8, 3),
        Err(Error::Overflow { bits: 3 })
    ));
}

#[test]
/// Zero width is never valid.
fn test_from_int_zero_width() {
    assert!(matches!(Bits::from_int(0, 0), Err(Error::InvalidWidth(0))));
}

#[test]
/// `from_bytes`/`to_bytes` round trip, most significant bit first per byte.
fn test_bytes_roundtrip() {
    let data = [0x12u8, 0x34, 0xFF, 0x00];
    let bits = Bits::from_bytes(&data);
    assert_eq!(bits.len(), 32);
    assert_eq!(bits.to_bytes().unwrap(), data.to_vec());
}

#[test]
/// A non-byte-aligned sequence cannot be packed into bytes.
fn test_to_bytes_unaligned() {
    let bits = Bits::from_int(0b101, 3).unwrap();
    assert!(matches!(bits.to_bytes(), Err(Error::Unaligned { bits: 3 })));
}

#[test]
/// Text round trips through UTF-8.
fn test_str_roundtrip_utf8() {
    let bits = Bits::from_str("hi", TextEncoding::Utf8).unwrap();
    assert_eq!(bits.to_str(TextEncoding::Utf8).unwrap(), "hi");
}

#[test]
/// Non-ASCII text is rejected under the ASCII encoding.
fn test_str_ascii_rejects_non_ascii() {
    assert!(Bits::from_str("café", TextEncoding::Ascii).is_none());
}

#[test]
/// Slicing returns a half-open, independent sub-sequence.
fn test_slice() {
    let bits = Bits::from_bytes(&[0b11110000]);
    let middle = bits.slice(2, 6);
    assert_eq!(middle.len(), 4);
    assert_eq!(middle.to_int(), 0b1100);
}

#[test]
/// Concatenation preserves order and is associative in effect.
fn test_concat() {
    let a = Bits::from_int(0b11, 2).unwrap();
    let b = Bits::from_int(0b001, 3).unwrap();
    let c = Bits::from_int(0, 1).unwrap();
    let joined = Bits::concat(&[a.clone(), b.clone(), c.clone()]);
    assert_eq!(joined.len(), 6);
    assert_eq!(joined.to_int(), 0b110010);

    let left = Bits::concat(&[Bits::concat(&[a.clone(), b.clone()]), c.clone()]);
    let right = Bits::concat(&[a, Bits::concat(&[b, c])]);
    assert_eq!(left, right);
}

#[test]
/// An empty sequence has no bits and packs to no bytes.
fn test_empty() {
    let empty = Bits::new();
    assert!(empty.is_empty());
    assert_eq!(empty.to_bytes().unwrap(), Vec::<u8>::new());
}
