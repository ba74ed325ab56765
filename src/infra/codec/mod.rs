//! The bitfield codec engine, organised leaves-first: `bits` underpins
//! `stream`, which underpins `field`, which underpins `record`. `schema` is
//! the public builder API; `reorder` and `streaming` are adapters built on
//! top of `record`.
pub mod bits;
pub mod field;
pub mod record;
pub mod reorder;
pub mod schema;
pub mod stream;
pub mod streaming;
pub mod traits;
