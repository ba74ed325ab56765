//! `benshi-codec`: a declarative framework for bit-accurate serialization and
//! deserialization of binary wire protocols.
//!
//! A composite record declares an ordered list of typed fields, each with a
//! bit width that may depend on already-decoded sibling fields and/or the
//! remaining bit budget of the enclosing frame. From that declaration the
//! engine derives both an encoder and a decoder that are exact inverses of
//! one another.
//!
//! The crate is organised leaves-first, following [`infra::codec`]:
//! [`infra::codec::bits`] (an immutable bit sequence) underpins
//! [`infra::codec::stream`] (a positioned cursor over it), which underpins
//! [`infra::codec::field`] (the tagged field variants), which underpins
//! [`infra::codec::record`] (named, ordered collections of fields). The
//! [`infra::codec::schema`] module is the public constructor API collaborators
//! use to declare records, and [`infra::codec::reorder`] implements the
//! firmware-version bit-reorder adapter. [`infra::codec::streaming`] adds a
//! pull-one-frame-at-a-time facade for byte-oriented transports.
//!
//! No wire protocol, transport, or radio semantics are defined by this crate;
//! it is the engine such payload schemas are written against.
#![no_std]

extern crate alloc;

//==================================================================================
/// Dynamic value union threaded through the engine (decoded field values,
/// discriminator results, nested record instances).
pub mod core;
/// Closed set of error kinds raised by every layer of the engine.
pub mod error;
/// The codec engine itself, organised leaves-first.
pub mod infra;
//==================================================================================

pub use core::Value;
pub use error::Error;
pub use infra::codec::bits::Bits;
pub use infra::codec::field::FieldNode;
pub use infra::codec::record::{Record, RecordBuilder, RecordValue, SiblingProxy};
pub use infra::codec::reorder::{reorder, unreorder};
pub use infra::codec::stream::BitStream;
pub use infra::codec::streaming::StreamDecoder;
pub use infra::codec::{schema, traits};
