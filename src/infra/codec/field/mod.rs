//! The tagged field variants a [`crate::infra::codec::record::Record`] is
//! built from. Each variant knows how to decode itself off a
//! [`crate::infra::codec::stream::BitStream`] and encode itself back into
//! [`Bits`], given a view of its already-processed siblings.
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::core::{TextEncoding, Value};
use crate::error::{Error, Result};
use crate::infra::codec::bits::Bits;
use crate::infra::codec::record::{Record, SiblingProxy};
use crate::infra::codec::stream::BitStream;
use crate::infra::codec::traits::{Context, Discriminator, MapBack, MapForward};

/// A field's declared shape and codec behaviour. `FieldNode` values are
/// immutable and cheaply cloned (inner payloads are `Arc`-shared), so a
/// schema built once may be reused across every record it's embedded in.
#[derive(Clone)]
pub enum FieldNode {
    /// A fixed-width raw bit sequence.
    Bits { len: usize },
    /// A fixed-width unsigned integer, most significant bit first.
    Integer { len: usize },
    /// A byte string. `len` is the length in bytes; `None` means "every
    /// whole byte left in the stream" and is only valid as a record's last
    /// field.
    Bytes { len: Option<usize> },
    /// Text under `encoding`. `len` is in bytes, with the same "rest of
    /// stream" convention as `Bytes`.
    Str { len: Option<usize>, encoding: TextEncoding },
    /// A fixed-length homogeneous sequence of `item`.
    List { item: Arc<FieldNode>, count: usize },
    /// `inner` composed with a value-preserving (on the values it actually
    /// produces) forward/back mapping.
    Map {
        inner: Arc<FieldNode>,
        forward: MapForward,
        back: MapBack,
    },
    /// `inner` constrained to decode (and only ever encode) one constant
    /// value.
    Literal { inner: Arc<FieldNode>, value: Arc<Value> },
    /// An embedded record. `len` overrides the schema's own static length
    /// when the record is truncated or padded relative to its declaration
    /// (e.g. a trailing variable-length record consuming "the rest").
    Nested { schema: Arc<Record>, len: Option<usize> },
    /// A field whose concrete schema is resolved at decode/encode time by
    /// a discriminator callback, e.g. a payload keyed by an earlier
    /// message-type field.
    Dyn { discriminator: Discriminator },
    /// Contributes nothing to the wire representation; always decodes to
    /// [`Value::None`] and accepts only [`Value::None`] on encode.
    None,
}

impl FieldNode {
    /// The field's length in bits, if it can be determined without a
    /// stream or a value (i.e. without resolving a `Dyn` field or reading
    /// a "rest of stream" `Bytes`/`Str` field).
    pub fn static_length(&self) -> Option<usize> {
        match self {
            FieldNode::Bits { len } | FieldNode::Integer { len } => Some(*len),
            FieldNode::Bytes { len } => len.map(|n| n * 8),
            FieldNode::Str { len, .. } => len.map(|n| n * 8),
            FieldNode::List { item, count } => item.static_length().map(|n| n * count),
            FieldNode::Map { inner, .. } => inner.static_length(),
            FieldNode::Literal { inner, .. } => inner.static_length(),
            FieldNode::Nested { schema, len } => len.map(|n| n * 8).or_else(|| schema.length()),
            FieldNode::Dyn { .. } => None,
            FieldNode::None => Some(0),
        }
    }

    /// Decode one value of this shape from `stream`, given the proxy of
    /// already-decoded sibling fields in the enclosing record.
    pub fn decode(&self, stream: &mut BitStream, proxy: &SiblingProxy, context: Context) -> Result<Value> {
        match self {
            FieldNode::Bits { len } => Ok(Value::Bits(stream.read(*len)?)),
            FieldNode::Integer { len } => Ok(Value::Int(stream.read(*len)?.to_int())),
            FieldNode::Bytes { len } => {
                let n = len.unwrap_or(stream.remaining() / 8);
                let bits = stream.read(n * 8)?;
                Ok(Value::Bytes(bits.to_bytes()?))
            }
            FieldNode::Str { len, encoding } => {
                let n = len.unwrap_or(stream.remaining() / 8);
                let bits = stream.read(n * 8)?;
                Ok(Value::Str(bits.to_str(*encoding)?))
            }
            FieldNode::List { item, count } => {
                let inner_proxy = SiblingProxy::new();
                let mut items = Vec::with_capacity(*count);
                for _ in 0..*count {
                    items.push(item.decode(stream, &inner_proxy, context)?);
                }
                Ok(Value::List(items))
            }
            FieldNode::Map { inner, forward, .. } => {
                let raw = inner.decode(stream, proxy, context)?;
                (forward.as_ref())(&raw)
            }
            FieldNode::Literal { inner, value } => {
                let decoded = inner.decode(stream, proxy, context)?;
                if &decoded != value.as_ref() {
                    return Err(Error::LiteralMismatch {
                        expected: (**value).clone(),
                        actual: decoded,
                    });
                }
                Ok(decoded)
            }
            FieldNode::Nested { schema, len } => {
                let explicit = len.map(|n| n * 8).or_else(|| schema.length());
                match explicit {
                    Some(n) => {
                        let bits = stream.read(n)?;
                        let mut inner = BitStream::new(bits);
                        let record_value = Record::decode_from_stream(schema, &mut inner, context)?;
                        if !inner.is_exhausted() {
                            return Err(Error::ShapeMismatch {
                                expected: n,
                                actual: n - inner.remaining(),
                            });
                        }
                        Ok(Value::Record(record_value))
                    }
                    // The nested schema's own length depends on what it
                    // reads (a trailing "rest of stream" field) so it must
                    // decode straight off the live stream.
                    None => Ok(Value::Record(Record::decode_from_stream(schema, stream, context)?)),
                }
            }
            FieldNode::Dyn { discriminator } => {
                let chosen = discriminator.resolve(proxy, context, stream.remaining(), None)?;
                chosen.decode(stream, proxy, context)
            }
            FieldNode::None => Ok(Value::None),
        }
    }

    /// Encode `value` under this shape, given the proxy of already-encoded
    /// sibling fields in the enclosing record and the caller-supplied
    /// context.
    pub fn encode(&self, value: &Value, proxy: &SiblingProxy, context: Context) -> Result<Bits> {
        match self {
            FieldNode::Bits { len } => match value {
                Value::Bits(b) if b.len() == *len => Ok(b.clone()),
                Value::Bits(b) => Err(Error::ShapeMismatch {
                    expected: *len,
                    actual: b.len(),
                }),
                other => Err(shape_error("Bits", other)),
            },
            FieldNode::Integer { len } => match value {
                Value::Int(n) => Bits::from_int(*n, *len as u32),
                other => Err(shape_error("Integer", other)),
            },
            FieldNode::Bytes { len } => match value {
                Value::Bytes(b) => {
                    if let Some(n) = len {
                        if b.len() != *n {
                            return Err(Error::ShapeMismatch {
                                expected: *n,
                                actual: b.len(),
                            });
                        }
                    }
                    Ok(Bits::from_bytes(b))
                }
                other => Err(shape_error("Bytes", other)),
            },
            FieldNode::Str { len, encoding } => match value {
                Value::Str(s) => {
                    let bits = Bits::from_str(s, *encoding).ok_or(Error::MapRoundtripFailure)?;
                    if let Some(n) = len {
                        if bits.len() != n * 8 {
                            return Err(Error::ShapeMismatch {
                                expected: n * 8,
                                actual: bits.len(),
                            });
                        }
                    }
                    Ok(bits)
                }
                other => Err(shape_error("Str", other)),
            },
            FieldNode::List { item, count } => match value {
                Value::List(items) => {
                    if items.len() != *count {
                        return Err(Error::ShapeMismatch {
                            expected: *count,
                            actual: items.len(),
                        });
                    }
                    let inner_proxy = SiblingProxy::new();
                    let parts: Result<Vec<Bits>> = items
                        .iter()
                        .map(|v| item.encode(v, &inner_proxy, context))
                        .collect();
                    Ok(Bits::concat(&parts?))
                }
                other => Err(shape_error("List", other)),
            },
            FieldNode::Map { inner, forward, back } => {
                let raw = (back.as_ref())(value)?;
                if &(forward.as_ref())(&raw)? != value {
                    return Err(Error::MapRoundtripFailure);
                }
                inner.encode(&raw, proxy, context)
            }
            FieldNode::Literal { inner, value: expected } => {
                if value != expected.as_ref() {
                    return Err(Error::LiteralMismatch {
                        expected: (**expected).clone(),
                        actual: value.clone(),
                    });
                }
                inner.encode(value, proxy, context)
            }
            FieldNode::Nested { schema, .. } => match value {
                Value::Record(rv) => Record::encode_value(schema, rv, context),
                other => Err(shape_error("Nested", other)),
            },
            FieldNode::Dyn { discriminator } => {
                let chosen = discriminator.resolve(proxy, context, 0, Some(value))?;
                chosen.encode(value, proxy, context)
            }
            FieldNode::None => match value {
                Value::None => Ok(Bits::new()),
                other => Err(shape_error("None", other)),
            },
        }
    }
}

/// Tag every `Value` variant so a wrong-shape encode input can be reported
/// through the closed `ShapeMismatch` kind instead of a bespoke one.
pub(crate) fn value_tag(value: &Value) -> usize {
    match value {
        Value::Bits(_) => 0,
        Value::Int(_) => 1,
        Value::Bytes(_) => 2,
        Value::Str(_) => 3,
        Value::List(_) => 4,
        Value::Record(_) => 5,
        Value::None => 6,
    }
}

const EXPECTED_TAG: [(&str, usize); 7] = [
    ("Bits", 0),
    ("Integer", 1),
    ("Bytes", 2),
    ("Str", 3),
    ("List", 4),
    ("Nested", 5),
    ("None", 6),
];

fn shape_error(field_kind: &'static str, actual: &Value) -> Error {
    let expected = EXPECTED_TAG
        .iter()
        .find(|(name, _)| *name == field_kind)
        .map(|(_, tag)| *tag)
        .unwrap_or(usize::MAX);
    Error::ShapeMismatch {
        expected,
        actual: value_tag(actual),
    }
}

impl core::fmt::Debug for FieldNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldNode::Bits { len } => write!(f, "Bits({len})"),
            FieldNode::Integer { len } => write!(f, "Integer({len})"),
            FieldNode::Bytes { len } => write!(f, "Bytes({len:?})"),
            FieldNode::Str { len, encoding } => write!(f, "Str({len:?}, {encoding:?})"),
            FieldNode::List { count, .. } => write!(f, "List(x{count})"),
            FieldNode::Map { .. } => write!(f, "Map(..)"),
            FieldNode::Literal { value, .. } => write!(f, "Literal({value:?})"),
            FieldNode::Nested { len, .. } => write!(f, "Nested({len:?})"),
            FieldNode::Dyn { .. } => write!(f, "Dyn(..)"),
            FieldNode::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
