//! Closed set of error kinds raised by the bitfield engine.
//!
//! Every layer (bits, stream, field, record, schema, reorder, streaming)
//! raises one of these variants; none are silently swallowed. The `Field`
//! variant is how [`crate::infra::codec::record`] decorates a child error
//! with the offending field and record name while preserving the original
//! cause, per the propagation policy of the core.
use alloc::boxed::Box;
use alloc::string::String;
use thiserror_no_std::Error;

use crate::core::Value;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A read would exceed the stream's remaining bits.
    #[error("read past end of stream: asked {asked} bit(s), {available} available")]
    Eof { asked: usize, available: usize },

    /// Decoding a whole record from a whole-byte input left bits unconsumed.
    #[error("{count} bit(s) left over after decoding the whole record")]
    ExtraBits { count: usize },

    /// Encoding a whole record produced a length that is not a multiple of 8.
    #[error("encoded length ({bits} bits) is not a multiple of 8")]
    Unaligned { bits: usize },

    /// An integer value does not fit the declared bit width.
    #[error("value does not fit in {bits} bit(s)")]
    Overflow { bits: usize },

    /// A list length, byte-string length, or nested record length mismatch.
    #[error("expected {expected} bit(s)/item(s), got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A literal field decoded, or was asked to encode, a value other than
    /// its required constant.
    #[error("literal field expected {expected:?}, got {actual:?}")]
    LiteralMismatch { expected: Value, actual: Value },

    /// A declared field could not be resolved to a `FieldNode`.
    #[error("field {field:?} of record {record:?} has no resolvable schema")]
    MissingFieldSchema {
        record: &'static str,
        field: &'static str,
    },

    /// A `FieldNode` nested inside another (list item, mapper inner, literal
    /// inner) carried a default; defaults are only valid on top-level fields.
    #[error("field {field:?} carries a default on a nested schema, which is not allowed")]
    NestedDefault { field: &'static str },

    /// A reorder permutation was malformed (out of range, duplicate index,
    /// or length mismatch).
    #[error("malformed reorder permutation: {reason}")]
    BadReorder { reason: String },

    /// A value mapper's `forward`/`back` were not mutual inverses.
    #[error("map forward/back are not inverses for this value")]
    MapRoundtripFailure,

    /// A bit width was zero or negative where positive is required.
    #[error("bit width must be positive, got {0}")]
    InvalidWidth(i64),

    /// A child error annotated with the field and record it occurred in.
    #[error("in field {field:?} of record {record:?}: {source}")]
    Field {
        record: &'static str,
        field: &'static str,
        source: Box<Error>,
    },
}

impl Error {
    /// Decorate `self` with the field/record it occurred in, preserving the
    /// original error as `source`. Used when propagating a child field's
    /// failure up to the enclosing record.
    pub fn in_field(self, record: &'static str, field: &'static str) -> Error {
        Error::Field {
            record,
            field,
            source: Box::new(self),
        }
    }

    /// True for [`Error::Eof`], including one wrapped in a `Field` context
    /// (the one kind the streaming facade treats as recoverable).
    pub fn is_eof(&self) -> bool {
        match self {
            Error::Eof { .. } => true,
            Error::Field { source, .. } => source.is_eof(),
            _ => false,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
