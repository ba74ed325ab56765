//! Named, ordered collections of fields, the unit a whole frame is decoded
//! into and encoded from. A `Record` optionally carries a bit-reorder
//! permutation for wire revisions that scramble bit order without changing
//! field widths (see [`crate::infra::codec::reorder`]).
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::core::Value;
use crate::error::{Error, Result};
use crate::infra::codec::bits::Bits;
use crate::infra::codec::field::FieldNode;
use crate::infra::codec::stream::BitStream;
use crate::infra::codec::traits::Context;

/// A single named slot in a record: its schema, and the default value used
/// to fill it in when encoding from a partial value set.
#[derive(Clone)]
pub struct Field {
    pub name: &'static str,
    pub schema: FieldNode,
    pub default: Option<Value>,
}

/// A named, ordered list of fields, with an optional wire-level reorder
/// permutation applied around the whole encoded bit sequence.
pub struct Record {
    pub name: &'static str,
    pub fields: Vec<Field>,
    pub permutation: Option<Vec<usize>>,
}

/// A decoded (or about-to-be-encoded) record instance: its schema handle
/// plus its field values in declaration order. Carrying the schema handle
/// lets an arity-3 `DynField` reconstruct the exact schema a nested record
/// was decoded with when re-encoding it (see
/// [`crate::infra::codec::traits::Discriminator3`]).
#[derive(Clone)]
pub struct RecordValue {
    pub schema: Arc<Record>,
    pub fields: Vec<(&'static str, Value)>,
}

impl RecordValue {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// An append-only, name-indexed view of the fields a record has processed
/// so far, handed to discriminators and mappers so they can inspect
/// already-decoded (or already-encoded) siblings without seeing the rest
/// of the record.
#[derive(Default)]
pub struct SiblingProxy {
    entries: RefCell<Vec<(&'static str, Value)>>,
}

impl SiblingProxy {
    pub fn new() -> Self {
        SiblingProxy {
            entries: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn append(&self, name: &'static str, value: Value) {
        self.entries.borrow_mut().push((name, value));
    }

    /// The current value of a named sibling, if it has been processed yet.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries
            .borrow()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.borrow().iter().map(|(n, _)| *n).collect()
    }

    fn into_fields(self) -> Vec<(&'static str, Value)> {
        self.entries.into_inner()
    }
}

impl Record {
    /// The record's total bit length if every field has a statically known
    /// width; `None` if any field (a `Dyn` field, or a trailing
    /// "rest of stream" `Bytes`/`Str`) can only be sized at decode time.
    pub fn length(&self) -> Option<usize> {
        let mut total = 0usize;
        for field in &self.fields {
            total += field.schema.static_length()?;
        }
        Some(total)
    }

    fn decode_fields(&self, stream: &mut BitStream, context: Context) -> Result<Vec<(&'static str, Value)>> {
        let proxy = SiblingProxy::new();
        for field in &self.fields {
            let value = field.schema.decode(stream, &proxy, context).map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::debug!("record {} failed decoding field {}", self.name, field.name);
                e.in_field(self.name, field.name)
            })?;
            #[cfg(feature = "defmt")]
            defmt::trace!("record {} decoded field {}", self.name, field.name);
            proxy.append(field.name, value);
        }
        Ok(proxy.into_fields())
    }

    /// Decode one instance of `schema` from `stream`, consuming exactly the
    /// bits its fields need (no trailing-bits check; used for records
    /// nested inside another field).
    pub fn decode_from_stream(
        schema: &Arc<Record>,
        stream: &mut BitStream,
        context: Context,
    ) -> Result<RecordValue> {
        let fields = schema.decode_fields(stream, context)?;
        Ok(RecordValue {
            schema: schema.clone(),
            fields,
        })
    }

    /// Decode a whole, self-contained bit sequence. Fails with
    /// [`Error::ExtraBits`] if fields don't consume every bit.
    pub fn decode_bits(schema: &Arc<Record>, bits: &Bits, context: Context) -> Result<RecordValue> {
        let realigned = match &schema.permutation {
            Some(permutation) => bits.unreorder(permutation)?,
            None => bits.clone(),
        };
        let mut stream = BitStream::new(realigned);
        let value = Record::decode_from_stream(schema, &mut stream, context)?;
        if !stream.is_exhausted() {
            return Err(Error::ExtraBits {
                count: stream.remaining(),
            });
        }
        Ok(value)
    }

    /// Decode a whole record from a byte string.
    pub fn decode_bytes(schema: &Arc<Record>, data: &[u8], context: Context) -> Result<RecordValue> {
        Record::decode_bits(schema, &Bits::from_bytes(data), context)
    }

    fn encode_fields(&self, values: &[(&'static str, Value)], context: Context) -> Result<Bits> {
        let proxy = SiblingProxy::new();
        let mut parts = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = values
                .iter()
                .find(|(name, _)| *name == field.name)
                .map(|(_, v)| v.clone())
                .or_else(|| field.default.clone())
                .ok_or(Error::MissingFieldSchema {
                    record: self.name,
                    field: field.name,
                })?;
            let encoded = field
                .schema
                .encode(&value, &proxy, context)
                .map_err(|e| e.in_field(self.name, field.name))?;
            proxy.append(field.name, value);
            parts.push(encoded);
        }
        Ok(Bits::concat(&parts))
    }

    /// Encode a record instance into its declaration-order bit sequence,
    /// then apply the wire-level reorder permutation if one is declared.
    pub fn encode_value(schema: &Arc<Record>, value: &RecordValue, context: Context) -> Result<Bits> {
        let bits = schema.encode_fields(&value.fields, context)?;
        match &schema.permutation {
            Some(permutation) => bits.reorder(permutation),
            None => Ok(bits),
        }
    }

    /// Encode a record instance into a byte string. Fails with
    /// [`Error::Unaligned`] if the encoded length isn't a multiple of 8.
    pub fn encode_bytes(schema: &Arc<Record>, value: &RecordValue, context: Context) -> Result<Vec<u8>> {
        Record::encode_value(schema, value, context)?.to_bytes()
    }
}

impl core::fmt::Debug for Record {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("fields", &self.fields.iter().map(|field| field.name).collect::<Vec<_>>())
            .finish()
    }
}

impl core::fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecordValue")
            .field("schema", &self.schema.name)
            .field("fields", &self.fields)
            .finish()
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name && self.fields == other.fields
    }
}

/// Builds a [`Record`] one field at a time. Returned by
/// [`crate::infra::codec::schema::record`].
pub struct RecordBuilder {
    name: &'static str,
    fields: Vec<Field>,
    permutation: Option<Vec<usize>>,
}

impl RecordBuilder {
    pub fn new(name: &'static str) -> Self {
        RecordBuilder {
            name,
            fields: Vec::new(),
            permutation: None,
        }
    }

    /// Append a required field with no default.
    pub fn field(mut self, name: &'static str, schema: FieldNode) -> Self {
        self.fields.push(Field {
            name,
            schema,
            default: None,
        });
        self
    }

    /// Append a field with a default used when encoding from a value set
    /// that omits it. Fails with [`Error::NestedDefault`] at `build()` time
    /// if the field's schema is a `Dyn` field, since a static default can't
    /// be validated against a schema only known at encode time.
    pub fn field_with_default(mut self, name: &'static str, schema: FieldNode, default: Value) -> Self {
        self.fields.push(Field {
            name,
            schema,
            default: Some(default),
        });
        self
    }

    /// Declare the wire-level reorder permutation (see
    /// [`crate::infra::codec::reorder`]).
    pub fn reorder(mut self, permutation: Vec<usize>) -> Self {
        self.permutation = Some(permutation);
        self
    }

    pub fn build(self) -> Result<Arc<Record>> {
        for field in &self.fields {
            if field.default.is_some() && matches!(field.schema, FieldNode::Dyn { .. }) {
                return Err(Error::NestedDefault { field: field.name });
            }
        }
        Ok(Arc::new(Record {
            name: self.name,
            fields: self.fields,
            permutation: self.permutation,
        }))
    }
}
