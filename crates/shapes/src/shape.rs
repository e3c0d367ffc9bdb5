//! Closed set of shape variants
//!
//! The cache only sees `(TypeTag, Shape)` pairs. `ShapeKind` fixes the tag
//! of every variant:
//!
//! | Variant | Tag |
//! |---------|-----|
//! | Point   | 1   |
//! | Circle  | 2   |
//! | Polygon | 3   |
//!
//! These values travel with every replicated record and MUST NOT change.

use crate::circle::Circle;
use crate::color::Color;
use crate::point::Point;
use crate::polygon::Polygon;
use shapecache_core::TypeTag;
use std::fmt;

/// Shape variant discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShapeKind {
    /// Single colored point
    Point = 1,
    /// Circle with center and radius
    Circle = 2,
    /// Closed polygon
    Polygon = 3,
}

impl ShapeKind {
    /// Every kind, in tag order
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Point, ShapeKind::Circle, ShapeKind::Polygon];

    /// Tag stored alongside records of this kind
    pub const fn type_tag(self) -> TypeTag {
        match TypeTag::new(self as u32) {
            Some(tag) => tag,
            // discriminants start at 1
            None => unreachable!(),
        }
    }

    /// Kind for a stored tag, if it names a shape
    pub fn from_tag(tag: TypeTag) -> Option<Self> {
        match tag.get() {
            1 => Some(ShapeKind::Point),
            2 => Some(ShapeKind::Circle),
            3 => Some(ShapeKind::Polygon),
            _ => None,
        }
    }

    /// Lowercase variant name
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A replicated shape record
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// See [`Point`]
    Point(Point),
    /// See [`Circle`]
    Circle(Circle),
    /// See [`Polygon`]
    Polygon(Polygon),
}

impl Shape {
    /// Variant of this record
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Tag this record is stored under
    pub fn type_tag(&self) -> TypeTag {
        self.kind().type_tag()
    }

    /// Color shared by every variant
    pub fn color(&self) -> Color {
        match self {
            Shape::Point(p) => p.color,
            Shape::Circle(c) => c.color,
            Shape::Polygon(p) => p.color,
        }
    }
}

impl From<Point> for Shape {
    fn from(point: Point) -> Self {
        Shape::Point(point)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
