//! Public constructor API collaborators use to declare records: one
//! function per field shape, mirroring [`crate::infra::codec::field::FieldNode`]
//! one-for-one, plus [`record`] to start a [`RecordBuilder`].
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::core::{TextEncoding, Value};
use crate::error::{Error, Result};
use crate::infra::codec::field::{value_tag, FieldNode};
use crate::infra::codec::record::{Record, RecordBuilder};
use crate::infra::codec::traits::{Discriminator, Discriminator1, Discriminator2, Discriminator3};

/// A fixed-width raw bit sequence.
pub fn bits(len: usize) -> FieldNode {
    FieldNode::Bits { len }
}

/// A fixed-width unsigned integer, most significant bit first.
pub fn integer(len: usize) -> FieldNode {
    FieldNode::Integer { len }
}

/// An integer field restricted to `E`'s valid discriminants. Decodes and
/// encodes the discriminant's own `u64` representation; `Value` has no case
/// for a bare enum, so this is a `Map` over `Integer { len }` that rejects
/// any raw value `E` doesn't recognize rather than actually materializing
/// one. `E: 'static` so the validator closure can outlive the call that
/// built it.
pub fn int_enum<E>(len: usize) -> FieldNode
where
    E: TryFrom<u64> + Into<u64> + Copy + 'static,
{
    let validate: Arc<dyn Fn(&Value) -> Result<Value>> = Arc::new(move |raw: &Value| match raw {
        Value::Int(n) => match E::try_from(*n) {
            Ok(variant) => Ok(Value::Int(variant.into())),
            Err(_) => Err(Error::Overflow { bits: len }),
        },
        other => Err(Error::ShapeMismatch {
            expected: value_tag(&Value::Int(0)),
            actual: value_tag(other),
        }),
    });
    FieldNode::Map {
        inner: Arc::new(FieldNode::Integer { len }),
        forward: validate.clone(),
        back: validate,
    }
}

/// A width-1 integer where 1 decodes to true and 0 to false.
pub fn bool() -> FieldNode {
    let validate: Arc<dyn Fn(&Value) -> Result<Value>> = Arc::new(|raw: &Value| match raw {
        Value::Int(0) | Value::Int(1) => Ok(raw.clone()),
        Value::Int(_) => Err(Error::Overflow { bits: 1 }),
        other => Err(Error::ShapeMismatch {
            expected: value_tag(&Value::Int(0)),
            actual: value_tag(other),
        }),
    });
    FieldNode::Map {
        inner: Arc::new(FieldNode::Integer { len: 1 }),
        forward: validate.clone(),
        back: validate,
    }
}

/// A byte string of exactly `len` bytes.
pub fn bytes(len: usize) -> FieldNode {
    FieldNode::Bytes { len: Some(len) }
}

/// A byte string consuming every whole byte left in the enclosing frame.
/// Only valid as a record's last field.
pub fn bytes_rest() -> FieldNode {
    FieldNode::Bytes { len: None }
}

/// Text of exactly `len` bytes under `encoding`.
pub fn string(len: usize, encoding: TextEncoding) -> FieldNode {
    FieldNode::Str {
        len: Some(len),
        encoding,
    }
}

/// Text consuming every whole byte left in the enclosing frame.
pub fn string_rest(encoding: TextEncoding) -> FieldNode {
    FieldNode::Str { len: None, encoding }
}

/// A fixed-length homogeneous sequence of `item`.
pub fn list(item: FieldNode, count: usize) -> FieldNode {
    FieldNode::List {
        item: Arc::new(item),
        count,
    }
}

/// `inner` composed with a value-preserving forward/back mapping. `back`
/// must be the exact inverse of `forward` on every value `forward` can
/// produce.
pub fn map(
    inner: FieldNode,
    forward: Arc<dyn Fn(&Value) -> Result<Value>>,
    back: Arc<dyn Fn(&Value) -> Result<Value>>,
) -> FieldNode {
    FieldNode::Map {
        inner: Arc::new(inner),
        forward,
        back,
    }
}

/// `inner` constrained to always decode, and only ever encode, `value`.
pub fn literal(inner: FieldNode, value: Value) -> FieldNode {
    FieldNode::Literal {
        inner: Arc::new(inner),
        value: Arc::new(value),
    }
}

/// An embedded record, sized by its own schema.
pub fn nested(schema: Arc<Record>) -> FieldNode {
    FieldNode::Nested { schema, len: None }
}

/// An embedded record truncated or padded to exactly `len` bytes.
pub fn nested_sized(schema: Arc<Record>, len: usize) -> FieldNode {
    FieldNode::Nested {
        schema,
        len: Some(len),
    }
}

/// A field resolved from already-decoded siblings alone.
pub fn dynamic_by_siblings(discriminator: Discriminator1) -> FieldNode {
    FieldNode::Dyn {
        discriminator: Discriminator::Siblings(discriminator),
    }
}

/// A field resolved from siblings plus the caller-supplied context.
pub fn dynamic_by_context(discriminator: Discriminator2) -> FieldNode {
    FieldNode::Dyn {
        discriminator: Discriminator::SiblingsAndContext(discriminator),
    }
}

/// A field resolved from siblings, the context, and the stream's remaining
/// bit budget on decode; on encode the schema is instead inferred from the
/// value's own shape (see [`Discriminator::resolve`]).
pub fn dynamic_by_remaining(discriminator: Discriminator3) -> FieldNode {
    FieldNode::Dyn {
        discriminator: Discriminator::SiblingsContextAndRemaining(discriminator),
    }
}

/// Contributes nothing to the wire representation.
pub fn none() -> FieldNode {
    FieldNode::None
}

/// Start declaring a record named `name`.
pub fn record(name: &'static str) -> RecordBuilder {
    RecordBuilder::new(name)
}

/// A record whose wire bit order is a permutation of its declaration
/// order (see [`crate::infra::codec::reorder`]).
pub fn reordered_record(name: &'static str, permutation: Vec<usize>) -> RecordBuilder {
    RecordBuilder::new(name).reorder(permutation)
}
