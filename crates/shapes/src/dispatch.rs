//! Typed iteration over untyped records
//!
//! The cache enumerates `(tag, &Shape)` pairs. [`dispatch`] turns each pair
//! back into a call to the iterator registered for that variant, with the
//! variant's fields unpacked.

use crate::color::Color;
use crate::shape::{Shape, ShapeKind};
use shapecache_core::{Error, Result, TypeTag};

/// Point iterator: `(color, x, y)`. Return `false` to stop.
pub type PointIterator<'a> = Box<dyn FnMut(Color, f64, f64) -> bool + 'a>;
/// Circle iterator: `(color, center_x, center_y, radius)`. Return `false` to stop.
pub type CircleIterator<'a> = Box<dyn FnMut(Color, f64, f64, f64) -> bool + 'a>;
/// Polygon iterator: `(color, vertex_count, vertices)`. Return `false` to stop.
pub type PolygonIterator<'a> = Box<dyn FnMut(Color, u32, &[f64]) -> bool + 'a>;

/// The three typed iterators an enumeration needs
///
/// ```rust,ignore
/// let iterators = ShapeIterators::new()
///     .on_point(|color, x, y| { println!("{:?} {} {}", color, x, y); true })
///     .on_circle(|_, _, _, _| true)
///     .on_polygon(|_, count, _| count > 0);
/// store.enumerate(iterators)?;
/// ```
#[derive(Default)]
pub struct ShapeIterators<'a> {
    point: Option<PointIterator<'a>>,
    circle: Option<CircleIterator<'a>>,
    polygon: Option<PolygonIterator<'a>>,
}

impl<'a> ShapeIterators<'a> {
    /// No iterators set
    pub fn new() -> Self {
        ShapeIterators {
            point: None,
            circle: None,
            polygon: None,
        }
    }

    /// Set the point iterator
    pub fn on_point(mut self, f: impl FnMut(Color, f64, f64) -> bool + 'a) -> Self {
        self.point = Some(Box::new(f));
        self
    }

    /// Set the circle iterator
    pub fn on_circle(mut self, f: impl FnMut(Color, f64, f64, f64) -> bool + 'a) -> Self {
        self.circle = Some(Box::new(f));
        self
    }

    /// Set the polygon iterator
    pub fn on_polygon(mut self, f: impl FnMut(Color, u32, &[f64]) -> bool + 'a) -> Self {
        self.polygon = Some(Box::new(f));
        self
    }

    /// Whether all three iterators are present
    pub fn is_complete(&self) -> bool {
        self.point.is_some() && self.circle.is_some() && self.polygon.is_some()
    }

    /// Fail with `InvalidArgument` unless all three iterators are present
    pub fn require_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::invalid_argument("iterators required"))
        }
    }
}

impl std::fmt::Debug for ShapeIterators<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeIterators")
            .field("point", &self.point.is_some())
            .field("circle", &self.circle.is_some())
            .field("polygon", &self.polygon.is_some())
            .finish()
    }
}

/// Route one stored record to its typed iterator
///
/// Returns the iterator's continue/stop answer.
///
/// # Errors
///
/// - `UnknownVariant` if `tag` names no shape
/// - `VariantMismatch` if `shape` is not the variant `tag` names
/// - `InvalidArgument` if the needed iterator is missing
pub fn dispatch(tag: TypeTag, shape: &Shape, iterators: &mut ShapeIterators<'_>) -> Result<bool> {
    let kind = ShapeKind::from_tag(tag).ok_or(Error::UnknownVariant(tag.get()))?;
    let missing = || Error::invalid_argument("iterators required");

    match (kind, shape) {
        (ShapeKind::Point, Shape::Point(p)) => {
            let f = iterators.point.as_mut().ok_or_else(missing)?;
            Ok(f(p.color, p.x, p.y))
        }
        (ShapeKind::Circle, Shape::Circle(c)) => {
            let f = iterators.circle.as_mut().ok_or_else(missing)?;
            Ok(f(c.color, c.center_x, c.center_y, c.radius))
        }
        (ShapeKind::Polygon, Shape::Polygon(p)) => {
            let f = iterators.polygon.as_mut().ok_or_else(missing)?;
            Ok(f(p.color, p.vertex_count(), p.vertices()))
        }
        (_, other) => Err(Error::VariantMismatch {
            tag: tag.get(),
            found: other.kind().name(),
        }),
    }
}
