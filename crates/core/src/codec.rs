//! Record codec trait definitions.

use crate::error::Result;
use crate::types::TypeTag;
use std::io::{Read, Write};

/// Codec for one record variant.
///
/// The cache stores records of type `R` without knowing anything about
/// them beyond their [`TypeTag`]. Each codec owns one tag and knows how to
/// turn records carrying that tag into bytes and back.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`: the cache may encode on a publishing
/// thread and decode on the thread delivering replicated changes.
///
/// # Decode Semantics
///
/// There are two decode operations:
///
/// - [`decode_new`](RecordCodec::decode_new) allocates a fresh record.
/// - [`decode_into`](RecordCodec::decode_into) refreshes an existing record
///   in place. When `dest` already holds this codec's variant its storage is
///   reused; otherwise it is replaced by a freshly decoded record.
///
/// A failed `decode_into` may leave `dest` partially overwritten. Callers
/// must not expose such a record.
pub trait RecordCodec<R>: Send + Sync {
    /// Tag this codec is registered under.
    fn type_tag(&self) -> TypeTag;

    /// Human-readable variant name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Encode `record` to `sink`.
    fn encode(&self, record: &R, sink: &mut dyn Write) -> Result<()>;

    /// Decode a freshly allocated record from `source`.
    fn decode_new(&self, source: &mut dyn Read) -> Result<R>;

    /// Decode from `source` into existing storage.
    fn decode_into(&self, source: &mut dyn Read, dest: &mut R) -> Result<()>;

    /// Release a record the cache no longer holds.
    fn release(&self, record: R) {
        drop(record);
    }
}
