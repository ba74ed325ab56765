//! Field-level decode/encode behaviour for each `FieldNode` variant.
use alloc::sync::Arc;
use alloc::vec;

use super::*;
use crate::infra::codec::record::RecordBuilder;

fn proxy() -> SiblingProxy {
    SiblingProxy::new()
}

#[test]
/// A plain integer field decodes most significant bit first and rejects
/// values that don't fit its width on encode.
fn test_integer_roundtrip() {
    let field = FieldNode::Integer { len: 8 };
    let mut stream = BitStream::from_bytes(&[0x2A]);
    let value = field.decode(&mut stream, &proxy(), None).unwrap();
    assert_eq!(value, Value::Int(0x2A));
    assert_eq!(field.encode(&value, &proxy(), None).unwrap().to_int(), 0x2A);
    assert!(matches!(
        field.encode(&Value::Int(256), &proxy(), None),
        Err(Error::Overflow { bits: 8 })
    ));
}

#[test]
/// A raw bits field preserves its exact width.
fn test_bits_field_shape_mismatch() {
    let field = FieldNode::Bits { len: 4 };
    let wrong = Bits::from_int(0b11111, 5).unwrap();
    assert!(matches!(
        field.encode(&Value::Bits(wrong), &proxy(), None),
        Err(Error::ShapeMismatch {
            expected: 4,
            actual: 5
        })
    ));
}

#[test]
/// `Bytes { len: None }` consumes every whole byte remaining in the
/// stream.
fn test_bytes_rest_of_stream() {
    let field = FieldNode::Bytes { len: None };
    let mut stream = BitStream::from_bytes(&[0x01, 0x02, 0x03]);
    let value = field.decode(&mut stream, &proxy(), None).unwrap();
    assert_eq!(value, Value::Bytes(vec![0x01, 0x02, 0x03]));
    assert!(stream.is_exhausted());
}

#[test]
/// A list decodes a fixed count of homogeneous items.
fn test_list_field() {
    let field = FieldNode::List {
        item: Arc::new(FieldNode::Integer { len: 4 }),
        count: 3,
    };
    let mut stream = BitStream::from_bytes(&[0b0001_0010, 0b0011_0000]);
    let value = field.decode(&mut stream, &proxy(), None).unwrap();
    assert_eq!(
        value,
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    let bits = field.encode(&value, &proxy(), None).unwrap();
    assert_eq!(bits.to_int(), 0b0001_0010_0011);
}

#[test]
/// A literal field requires an exact match and rejects anything else.
fn test_literal_field() {
    let field = FieldNode::Literal {
        inner: Arc::new(FieldNode::Integer { len: 8 }),
        value: Arc::new(Value::Int(0xAB)),
    };
    let mut stream = BitStream::from_bytes(&[0xAB]);
    assert_eq!(field.decode(&mut stream, &proxy(), None).unwrap(), Value::Int(0xAB));

    let mut wrong_stream = BitStream::from_bytes(&[0xFF]);
    assert!(matches!(
        field.decode(&mut wrong_stream, &proxy(), None),
        Err(Error::LiteralMismatch { .. })
    ));
    assert!(matches!(
        field.encode(&Value::Int(0xFF), &proxy(), None),
        Err(Error::LiteralMismatch { .. })
    ));
}

#[test]
/// A map field composes a forward/back pair on top of its inner field.
fn test_map_field_scales_by_ten() {
    let field = FieldNode::Map {
        inner: Arc::new(FieldNode::Integer { len: 8 }),
        forward: Arc::new(|raw: &Value| match raw {
            Value::Int(n) => Ok(Value::Int(n * 10)),
            _ => unreachable!(),
        }),
        back: Arc::new(|scaled: &Value| match scaled {
            Value::Int(n) => Ok(Value::Int(n / 10)),
            _ => unreachable!(),
        }),
    };
    let mut stream = BitStream::from_bytes(&[5]);
    assert_eq!(field.decode(&mut stream, &proxy(), None).unwrap(), Value::Int(50));
    assert_eq!(field.encode(&Value::Int(50), &proxy(), None).unwrap().to_int(), 5);
}

#[test]
/// A nested record field decodes and re-encodes a whole sub-record.
fn test_nested_field_roundtrip() {
    let inner_schema = RecordBuilder::new("inner")
        .field("a", FieldNode::Integer { len: 4 })
        .field("b", FieldNode::Integer { len: 4 })
        .build()
        .unwrap();
    let field = FieldNode::Nested {
        schema: inner_schema,
        len: None,
    };
    let mut stream = BitStream::from_bytes(&[0x3C]);
    let value = field.decode(&mut stream, &proxy(), None).unwrap();
    let encoded = field.encode(&value, &proxy(), None).unwrap();
    assert_eq!(encoded.to_int(), 0x3C);
}

#[test]
/// A none field always decodes to `Value::None` and consumes no bits.
fn test_none_field() {
    let field = FieldNode::None;
    let mut stream = BitStream::from_bytes(&[0xFF]);
    assert_eq!(field.decode(&mut stream, &proxy(), None).unwrap(), Value::None);
    assert_eq!(stream.remaining(), 8);
    assert_eq!(field.encode(&Value::None, &proxy(), None).unwrap().len(), 0);
}

#[test]
/// A `Dyn` field resolves its concrete schema from already-decoded
/// siblings.
fn test_dyn_field_by_sibling() {
    let field = FieldNode::Dyn {
        discriminator: Discriminator::Siblings(Arc::new(|siblings: &SiblingProxy| {
            match siblings.get("kind") {
                Some(Value::Int(1)) => Ok(FieldNode::Integer { len: 8 }),
                _ => Ok(FieldNode::Bytes { len: Some(2) }),
            }
        })),
    };

    let siblings = SiblingProxy::new();
    siblings.append("kind", Value::Int(1));
    let mut stream = BitStream::from_bytes(&[0x42]);
    assert_eq!(
        field.decode(&mut stream, &siblings, None).unwrap(),
        Value::Int(0x42)
    );
}
