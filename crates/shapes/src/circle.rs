//! Circle shape and its codec
//!
//! Wire layout: `color (3) | center_x (f64) | center_y (f64) | radius (f64)`.

use crate::color::Color;
use crate::shape::{Shape, ShapeKind};
use shapecache_core::{wire, Error, RecordCodec, Result, TypeTag};
use std::io::{Read, Write};
use tracing::trace;

/// Colored circle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    /// Fill color
    pub color: Color,
    /// Center, horizontal coordinate
    pub center_x: f64,
    /// Center, vertical coordinate
    pub center_y: f64,
    /// Radius
    pub radius: f64,
}

impl Circle {
    /// Encoded size in bytes
    pub const WIRE_SIZE: usize = Color::WIRE_SIZE + 3 * 8;

    /// Create a circle
    pub fn new(color: Color, center_x: f64, center_y: f64, radius: f64) -> Self {
        Circle {
            color,
            center_x,
            center_y,
            radius,
        }
    }

    fn encode(&self, sink: &mut dyn Write) -> Result<()> {
        self.color.encode(sink)?;
        wire::write_f64(sink, self.center_x)?;
        wire::write_f64(sink, self.center_y)?;
        wire::write_f64(sink, self.radius)
    }

    fn decode_into(&mut self, source: &mut dyn Read) -> Result<()> {
        self.color.decode_into(source)?;
        self.center_x = wire::read_f64(source)?;
        self.center_y = wire::read_f64(source)?;
        self.radius = wire::read_f64(source)?;
        Ok(())
    }
}

/// Codec for [`Shape::Circle`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleCodec;

impl RecordCodec<Shape> for CircleCodec {
    fn type_tag(&self) -> TypeTag {
        ShapeKind::Circle.type_tag()
    }

    fn name(&self) -> &'static str {
        ShapeKind::Circle.name()
    }

    fn encode(&self, record: &Shape, sink: &mut dyn Write) -> Result<()> {
        trace!("circle encode");
        match record {
            Shape::Circle(circle) => circle.encode(sink),
            other => Err(Error::VariantMismatch {
                tag: self.type_tag().get(),
                found: other.kind().name(),
            }),
        }
    }

    fn decode_new(&self, source: &mut dyn Read) -> Result<Shape> {
        trace!("circle decode");
        let mut circle = Circle::default();
        circle.decode_into(source)?;
        Ok(Shape::Circle(circle))
    }

    fn decode_into(&self, source: &mut dyn Read, dest: &mut Shape) -> Result<()> {
        match dest {
            Shape::Circle(circle) => {
                trace!("circle refresh");
                circle.decode_into(source)
            }
            other => {
                *other = self.decode_new(source)?;
                Ok(())
            }
        }
    }
}
