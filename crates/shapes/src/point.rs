//! Point shape and its codec
//!
//! Wire layout: `color (3) | x (f64) | y (f64)`.

use crate::color::Color;
use crate::shape::{Shape, ShapeKind};
use shapecache_core::{wire, Error, RecordCodec, Result, TypeTag};
use std::io::{Read, Write};
use tracing::trace;

/// Colored point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Fill color
    pub color: Color,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Encoded size in bytes
    pub const WIRE_SIZE: usize = Color::WIRE_SIZE + 2 * 8;

    /// Create a point
    pub fn new(color: Color, x: f64, y: f64) -> Self {
        Point { color, x, y }
    }

    fn encode(&self, sink: &mut dyn Write) -> Result<()> {
        self.color.encode(sink)?;
        wire::write_f64(sink, self.x)?;
        wire::write_f64(sink, self.y)
    }

    fn decode_into(&mut self, source: &mut dyn Read) -> Result<()> {
        self.color.decode_into(source)?;
        self.x = wire::read_f64(source)?;
        self.y = wire::read_f64(source)?;
        Ok(())
    }
}

/// Codec for [`Shape::Point`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct PointCodec;

impl RecordCodec<Shape> for PointCodec {
    fn type_tag(&self) -> TypeTag {
        ShapeKind::Point.type_tag()
    }

    fn name(&self) -> &'static str {
        ShapeKind::Point.name()
    }

    fn encode(&self, record: &Shape, sink: &mut dyn Write) -> Result<()> {
        trace!("point encode");
        match record {
            Shape::Point(point) => point.encode(sink),
            other => Err(Error::VariantMismatch {
                tag: self.type_tag().get(),
                found: other.kind().name(),
            }),
        }
    }

    fn decode_new(&self, source: &mut dyn Read) -> Result<Shape> {
        trace!("point decode");
        let mut point = Point::default();
        point.decode_into(source)?;
        Ok(Shape::Point(point))
    }

    fn decode_into(&self, source: &mut dyn Read, dest: &mut Shape) -> Result<()> {
        match dest {
            Shape::Point(point) => {
                trace!("point refresh");
                point.decode_into(source)
            }
            other => {
                *other = self.decode_new(source)?;
                Ok(())
            }
        }
    }
}
