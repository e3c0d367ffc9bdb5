//! Shape codec registry
//!
//! Built once when a store opens and handed to the cache, which then
//! encodes, decodes and releases shapes by tag alone.

use crate::circle::CircleCodec;
use crate::point::PointCodec;
use crate::polygon::PolygonCodec;
use crate::shape::Shape;
use shapecache_core::{CodecRegistry, Result};
use std::sync::Arc;

/// Registry holding the point, circle and polygon codecs
pub fn shape_registry() -> Result<CodecRegistry<Shape>> {
    let mut registry = CodecRegistry::new();
    registry.register(Arc::new(PointCodec))?;
    registry.register(Arc::new(CircleCodec))?;
    registry.register(Arc::new(PolygonCodec))?;
    Ok(registry)
}
