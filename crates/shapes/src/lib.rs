//! Replicated shapes for shapecache
//!
//! This crate is the typed layer over the generic replicated cache:
//! - Color / Point / Circle / Polygon: the shape values
//! - Shape / ShapeKind: the closed set of variants and their type tags
//! - PointCodec / CircleCodec / PolygonCodec: wire codecs, one per variant
//! - dispatch: routes an enumerated record to its typed iterator
//! - StoreConfig: `shapes.toml` configuration
//! - ShapeStore: open / add / enumerate / close facade

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod circle;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod point;
pub mod polygon;
pub mod registry;
pub mod shape;
pub mod store;

pub use circle::{Circle, CircleCodec};
pub use color::Color;
pub use config::{StoreConfig, CONFIG_FILE_NAME, DEFAULT_TRANSACTION};
pub use dispatch::{dispatch, CircleIterator, PointIterator, PolygonIterator, ShapeIterators};
pub use point::{Point, PointCodec};
pub use polygon::{Polygon, PolygonCodec};
pub use registry::shape_registry;
pub use shape::{Shape, ShapeKind};
pub use store::{ChangeCallback, ShapeStore, StoreStatus};
