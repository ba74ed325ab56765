//! External contracts a payload schema provides to the engine: the
//! discriminator callback a `DynField` resolves its concrete schema
//! through, and the value mapper a `MapField` composes on top of an inner
//! field. Both are plain closures; these are just the shapes the engine
//! calls them with.
use alloc::sync::Arc;
use core::any::Any;

use crate::core::{TextEncoding, Value};
use crate::error::{Error, Result};
use crate::infra::codec::field::FieldNode;
use crate::infra::codec::record::SiblingProxy;

/// The caller-supplied opaque value threaded through one whole decode or
/// encode call. The core never inspects it; only arity-2 and arity-3
/// discriminators see it, typically to `downcast_ref` it back to whatever
/// concrete type the collaborator threaded through.
pub type Context<'a> = Option<&'a dyn Any>;

/// A discriminator that only looks at already-decoded sibling field values
/// (arity 1): e.g. "pick the payload schema for message type N".
pub type Discriminator1 = Arc<dyn Fn(&SiblingProxy) -> Result<FieldNode>>;

/// A discriminator that additionally sees the caller-supplied context
/// (arity 2): e.g. "pick the payload schema for the protocol version
/// named in the context".
pub type Discriminator2 = Arc<dyn Fn(&SiblingProxy, Context) -> Result<FieldNode>>;

/// A discriminator that additionally sees how many bits remain in the
/// enclosing frame (arity 3), consulted only on decode: e.g. "the last
/// field is a string iff fewer than 4 bytes remain". On encode this
/// discriminator is never called; the engine instead infers the schema
/// from the runtime shape of the value being encoded (see
/// [`Discriminator::resolve`]), per the source's own documented asymmetry.
pub type Discriminator3 = Arc<dyn Fn(&SiblingProxy, Context, usize) -> Result<FieldNode>>;

/// The three discriminator arities a `DynField` may be built from.
#[derive(Clone)]
pub enum Discriminator {
    Siblings(Discriminator1),
    SiblingsAndContext(Discriminator2),
    SiblingsContextAndRemaining(Discriminator3),
}

impl Discriminator {
    /// Resolve the concrete field schema. `remaining` is the stream's
    /// remaining bit count, only meaningful on decode. `value` is present
    /// only on encode; when it is, an arity-3 discriminator is bypassed
    /// entirely in favour of inferring the schema from the value's own
    /// shape, matching the source's arity-3 encode behaviour.
    pub fn resolve(
        &self,
        proxy: &SiblingProxy,
        context: Context,
        remaining: usize,
        value: Option<&Value>,
    ) -> Result<FieldNode> {
        match self {
            Discriminator::Siblings(f) => (f.as_ref())(proxy),
            Discriminator::SiblingsAndContext(f) => (f.as_ref())(proxy, context),
            Discriminator::SiblingsContextAndRemaining(f) => match value {
                Some(v) => infer_from_value(v),
                None => (f.as_ref())(proxy, context, remaining),
            },
        }
    }
}

/// Reconstruct the `FieldNode` an arity-3 `DynField` was decoded with from
/// the runtime shape of the value now being encoded, without re-invoking
/// the discriminator. Only the shapes the source documents as carrying
/// enough information are supported: a byte string, a string, a nested
/// record, or none.
fn infer_from_value(value: &Value) -> Result<FieldNode> {
    match value {
        Value::Bytes(b) => Ok(FieldNode::Bytes { len: Some(b.len()) }),
        Value::Str(s) => Ok(FieldNode::Str {
            len: Some(s.as_bytes().len()),
            encoding: TextEncoding::Utf8,
        }),
        Value::Record(rv) => Ok(FieldNode::Nested {
            schema: rv.schema.clone(),
            len: None,
        }),
        Value::None => Ok(FieldNode::None),
        other => Err(Error::ShapeMismatch {
            expected: usize::MAX,
            actual: crate::infra::codec::field::value_tag(other),
        }),
    }
}

impl core::fmt::Debug for Discriminator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let arity = match self {
            Discriminator::Siblings(_) => 1,
            Discriminator::SiblingsAndContext(_) => 2,
            Discriminator::SiblingsContextAndRemaining(_) => 3,
        };
        write!(f, "Discriminator(arity {})", arity)
    }
}

/// The forward/back pair a `MapField` composes on top of its inner field.
/// `forward` turns a decoded inner value into the outer value; `back` must
/// be its exact inverse on every value `forward` can produce.
pub type MapForward = Arc<dyn Fn(&Value) -> Result<Value>>;
pub type MapBack = Arc<dyn Fn(&Value) -> Result<Value>>;
