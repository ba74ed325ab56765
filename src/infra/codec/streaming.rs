//! A pull-one-record-at-a-time façade over a byte-oriented transport that
//! delivers a frame's bytes in arbitrary chunks. Feed bytes in with
//! [`StreamDecoder::push`], then call [`StreamDecoder::pull`] until it
//! reports [`PullOutcome::NeedMoreBytes`].
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::infra::codec::bits::Bits;
use crate::infra::codec::record::{Record, RecordValue};
use crate::infra::codec::stream::BitStream;
use crate::infra::codec::traits::Context;

/// The result of one [`StreamDecoder::pull`] call.
#[derive(Debug)]
pub enum PullOutcome {
    /// A complete record was decoded, along with the number of bytes it
    /// consumed from the front of the buffer.
    Record(RecordValue, usize),
    /// Not enough bytes are buffered yet; the buffer was left untouched.
    /// The caller should `push` more bytes and try again.
    NeedMoreBytes,
}

/// Buffers incoming bytes and decodes one `schema`-shaped record at a time
/// off the front of the buffer, distinguishing a recoverable "not enough
/// data yet" condition from a fatal decode error.
pub struct StreamDecoder {
    schema: Arc<Record>,
    stream: BitStream,
}

impl StreamDecoder {
    pub fn new(schema: Arc<Record>) -> Self {
        StreamDecoder {
            schema,
            stream: BitStream::new(Bits::new()),
        }
    }

    /// Append newly-arrived bytes to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.stream.extend(&Bits::from_bytes(data));
    }

    /// Attempt to decode one record off the front of the buffer.
    ///
    /// On [`Error::Eof`] (including one wrapped in a field context) the
    /// buffer's read position is left untouched so a later `push` followed
    /// by another `pull` can retry from the same point; any other error is
    /// fatal and the caller should treat the stream as desynchronised. On
    /// success, bytes already consumed are dropped from the buffer.
    pub fn pull(&mut self, context: Context) -> Result<PullOutcome> {
        let mut attempt = self.stream.clone();
        match Record::decode_from_stream(&self.schema, &mut attempt, context) {
            Ok(value) => {
                let consumed_bytes = attempt.position() / 8;
                self.stream = attempt;
                self.stream.compact();
                #[cfg(feature = "defmt")]
                defmt::trace!("stream decoder pulled a record for {}", self.schema.name);
                Ok(PullOutcome::Record(value, consumed_bytes))
            }
            Err(e) if e.is_eof() => {
                #[cfg(feature = "defmt")]
                defmt::trace!("stream decoder needs more bytes");
                Ok(PullOutcome::NeedMoreBytes)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("stream decoder hit a fatal error");
                Err(e)
            }
        }
    }

    /// Bytes buffered but not yet consumed by a decoded record.
    pub fn buffered(&self) -> Vec<u8> {
        self.stream.remaining_bytes()
    }
}
