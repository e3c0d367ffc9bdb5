//! Codec registry for tag-based record handling
//!
//! The registry is the only thing a cache needs to store, replicate and
//! release records it cannot name. It is built once by the domain layer
//! and handed to the cache when joining a group.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = CodecRegistry::new();
//! registry.register(Arc::new(PointCodec))?;
//! registry.register(Arc::new(CircleCodec))?;
//!
//! let mut bytes = Vec::new();
//! registry.encode(tag, &record, &mut bytes)?;
//! let copy = registry.decode_new(tag, &mut bytes.as_slice())?;
//! ```

use crate::codec::RecordCodec;
use crate::error::{Error, Result};
use crate::types::TypeTag;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::trace;

/// Registry of codecs keyed by type tag
pub struct CodecRegistry<R> {
    codecs: HashMap<TypeTag, Arc<dyn RecordCodec<R>>>,
}

impl<R> CodecRegistry<R> {
    /// Create a new empty registry
    pub fn new() -> Self {
        CodecRegistry {
            codecs: HashMap::new(),
        }
    }

    /// Register a codec under its own tag
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if another codec already owns the tag.
    pub fn register(&mut self, codec: Arc<dyn RecordCodec<R>>) -> Result<()> {
        let tag = codec.type_tag();
        if let Some(existing) = self.codecs.get(&tag) {
            return Err(Error::invalid_argument(format!(
                "type tag {} already registered to {}",
                tag,
                existing.name()
            )));
        }
        self.codecs.insert(tag, codec);
        Ok(())
    }

    /// Get codec by tag
    pub fn get(&self, tag: TypeTag) -> Result<&dyn RecordCodec<R>> {
        self.codecs
            .get(&tag)
            .map(|codec| codec.as_ref())
            .ok_or(Error::UnknownVariant(tag.get()))
    }

    /// Resolve a raw wire tag
    ///
    /// Tag 0 and unregistered tags both fail with `UnknownVariant`.
    pub fn resolve(&self, raw: u32) -> Result<TypeTag> {
        TypeTag::new(raw)
            .filter(|tag| self.codecs.contains_key(tag))
            .ok_or(Error::UnknownVariant(raw))
    }

    /// Encode `record` with the codec registered for `tag`
    pub fn encode(&self, tag: TypeTag, record: &R, sink: &mut dyn Write) -> Result<()> {
        self.get(tag)?.encode(record, sink)
    }

    /// Decode a new record with the codec registered for `tag`
    pub fn decode_new(&self, tag: TypeTag, source: &mut dyn Read) -> Result<R> {
        self.get(tag)?.decode_new(source)
    }

    /// Refresh `dest` in place with the codec registered for `tag`
    pub fn decode_into(&self, tag: TypeTag, source: &mut dyn Read, dest: &mut R) -> Result<()> {
        self.get(tag)?.decode_into(source, dest)
    }

    /// Release `record` through the codec registered for `tag`
    ///
    /// Records with an unregistered tag are simply dropped.
    pub fn release(&self, tag: TypeTag, record: R) {
        match self.codecs.get(&tag) {
            Some(codec) => codec.release(record),
            None => {
                trace!(tag = tag.get(), "releasing record without codec");
                drop(record);
            }
        }
    }

    /// Check if a tag is registered
    pub fn is_registered(&self, tag: TypeTag) -> bool {
        self.codecs.contains_key(&tag)
    }

    /// Get all registered tags, sorted
    pub fn tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = self.codecs.keys().copied().collect();
        tags.sort();
        tags
    }

    /// Get the number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl<R> Default for CodecRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for CodecRegistry<R> {
    fn clone(&self) -> Self {
        CodecRegistry {
            codecs: self.codecs.clone(),
        }
    }
}

impl<R> std::fmt::Debug for CodecRegistry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<(u32, &'static str)> = self
            .tags()
            .into_iter()
            .filter_map(|tag| self.codecs.get(&tag).map(|c| (tag.get(), c.name())))
            .collect();
        f.debug_struct("CodecRegistry")
            .field("codec_count", &self.codecs.len())
            .field("codecs", &names)
            .finish()
    }
}
