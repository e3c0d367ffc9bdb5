//! Polygon shape and its codec
//!
//! Wire layout: `color (3) | vertex_count (u32) | x0 y0 x1 y1 ... (2 × vertex_count f64)`.
//!
//! The polygon owns its vertex buffer. The buffer always holds exactly
//! `2 × vertex_count` values, so the count is derived from it rather than
//! stored separately.

use crate::color::Color;
use crate::shape::{Shape, ShapeKind};
use shapecache_core::{wire, Error, RecordCodec, Result, TypeTag};
use std::io::{Read, Write};
use tracing::trace;

/// Colored polygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    /// Outline color
    pub color: Color,
    vertices: Vec<f64>,
}

impl Polygon {
    /// Create a polygon from a flat `x0, y0, x1, y1, ...` buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `vertices.len() == 2 * vertex_count`.
    pub fn new(color: Color, vertex_count: u32, vertices: Vec<f64>) -> Result<Self> {
        let expected = coordinate_len(vertex_count).ok_or_else(|| {
            Error::invalid_argument(format!("vertex count {} too large", vertex_count))
        })?;
        if vertices.len() != expected {
            return Err(Error::invalid_argument(format!(
                "{} vertices need {} coordinates, got {}",
                vertex_count,
                expected,
                vertices.len()
            )));
        }
        Ok(Polygon { color, vertices })
    }

    /// Create a polygon from `(x, y)` pairs
    pub fn from_points(color: Color, points: &[(f64, f64)]) -> Result<Self> {
        if u32::try_from(points.len()).is_err() {
            return Err(Error::invalid_argument(format!(
                "{} vertices exceed the wire limit",
                points.len()
            )));
        }
        let vertices = points.iter().flat_map(|&(x, y)| [x, y]).collect();
        Ok(Polygon { color, vertices })
    }

    /// Number of `(x, y)` vertices
    pub fn vertex_count(&self) -> u32 {
        // `new`, `from_points` and decode keep the count within u32.
        (self.vertices.len() / 2) as u32
    }

    /// Flat coordinate buffer
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    /// Vertices as `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.vertices.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Encoded size in bytes
    pub fn wire_size(&self) -> usize {
        Color::WIRE_SIZE + 4 + 8 * self.vertices.len()
    }

    /// Allocated vertex capacity, in coordinates
    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    fn encode(&self, sink: &mut dyn Write) -> Result<()> {
        self.color.encode(sink)?;
        wire::write_u32(sink, self.vertex_count())?;
        for value in &self.vertices {
            wire::write_f64(sink, *value)?;
        }
        Ok(())
    }

    fn decode_into(&mut self, source: &mut dyn Read) -> Result<()> {
        self.color.decode_into(source)?;
        let count = wire::read_u32(source)?;
        let len = coordinate_len(count).ok_or_else(|| {
            Error::AllocationFailure(format!("vertex count {} overflows the buffer size", count))
        })?;

        // Reuses the existing buffer when it is large enough.
        self.vertices.clear();
        self.vertices.try_reserve_exact(len).map_err(|e| {
            Error::AllocationFailure(format!("buffer for {} vertices: {}", count, e))
        })?;
        for _ in 0..len {
            match wire::read_f64(source) {
                Ok(value) => self.vertices.push(value),
                Err(e) => {
                    self.vertices.clear();
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

fn coordinate_len(vertex_count: u32) -> Option<usize> {
    usize::try_from(vertex_count).ok()?.checked_mul(2)
}

/// Codec for [`Shape::Polygon`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonCodec;

impl RecordCodec<Shape> for PolygonCodec {
    fn type_tag(&self) -> TypeTag {
        ShapeKind::Polygon.type_tag()
    }

    fn name(&self) -> &'static str {
        ShapeKind::Polygon.name()
    }

    fn encode(&self, record: &Shape, sink: &mut dyn Write) -> Result<()> {
        trace!("polygon encode");
        match record {
            Shape::Polygon(polygon) => polygon.encode(sink),
            other => Err(Error::VariantMismatch {
                tag: self.type_tag().get(),
                found: other.kind().name(),
            }),
        }
    }

    fn decode_new(&self, source: &mut dyn Read) -> Result<Shape> {
        trace!("polygon decode");
        let mut polygon = Polygon::default();
        polygon.decode_into(source)?;
        Ok(Shape::Polygon(polygon))
    }

    fn decode_into(&self, source: &mut dyn Read, dest: &mut Shape) -> Result<()> {
        match dest {
            Shape::Polygon(polygon) => {
                trace!(capacity = polygon.capacity(), "polygon refresh");
                polygon.decode_into(source)
            }
            other => {
                *other = self.decode_new(source)?;
                Ok(())
            }
        }
    }

    fn release(&self, record: Shape) {
        if let Shape::Polygon(Polygon { vertices, .. }) = record {
            trace!(coordinates = vertices.len(), "polygon release");
            // Buffer first, then the shell.
            drop(vertices);
        }
    }
}
