//! The dynamic value union threaded through the codec engine.
//!
//! Every layer ([`crate::infra::codec::field`], [`crate::infra::codec::record`],
//! the discriminator contract of [`crate::infra::codec::traits`]) needs a
//! concrete Rust type standing in for "whatever shape this field's value
//! has". `Value` is that type: the fixed sum of shapes a decoded field, a
//! discriminator result, or a record's field value can take.
use alloc::string::String;
use alloc::vec::Vec;

use crate::infra::codec::bits::Bits;
use crate::infra::codec::record::RecordValue;

/// Text encodings a [`crate::infra::codec::field::FieldNode::Str`] field may
/// declare. Only lossless, byte-preserving encodings are supported; the core
/// never guesses an encoding from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
}

impl TextEncoding {
    /// Decode `bytes` under this encoding, or `None` if they are not valid
    /// text under it.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => core::str::from_utf8(bytes).ok().map(String::from),
            TextEncoding::Ascii => {
                if bytes.is_ascii() {
                    // ASCII is a subset of UTF-8; the byte sequence is reused verbatim.
                    core::str::from_utf8(bytes).ok().map(String::from)
                } else {
                    None
                }
            }
        }
    }

    /// Encode `s` under this encoding, or `None` if `s` contains characters
    /// the encoding cannot represent.
    pub fn encode(self, s: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Some(s.as_bytes().to_vec()),
            TextEncoding::Ascii => {
                if s.is_ascii() {
                    Some(s.as_bytes().to_vec())
                } else {
                    None
                }
            }
        }
    }
}

/// The value of a decoded (or to-be-encoded) field.
///
/// `Value` is the Rust analogue of the dynamically-typed field values the
/// original schema engine passes around (an int, a `Bits`, a byte string, a
/// nested record instance, or `None`); every `FieldNode` variant decodes to
/// one of these shapes and encodes from one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The shape produced by [`crate::infra::codec::field::FieldNode::Bits`].
    Bits(Bits),
    /// An unsigned integer of at most 64 bits, produced by
    /// [`crate::infra::codec::field::FieldNode::Integer`].
    Int(u64),
    /// An owned byte string, produced by `Bytes` and `Binary`-shaped fields.
    Bytes(Vec<u8>),
    /// An owned text string, produced by `Str` fields.
    Str(String),
    /// A homogeneous sequence of item values, produced by `List` fields.
    List(Vec<Value>),
    /// A nested record instance, produced by `Nested` fields. Carries its own
    /// schema handle so an arity-3 dynamic field can reconstruct the exact
    /// `NestedField` it was encoded with (see §4.3's DynField contract).
    Record(RecordValue),
    /// The absence of a value, produced by `None` fields.
    None,
}
