//! shapecache - replicated colored shapes
//!
//! A process keeps a set of points, circles and polygons replicated across
//! every member of an IPv4 multicast group. Records travel as compact
//! big-endian encodings; each member decodes them into its own local view.
//!
//! # Quick Start
//!
//! ```ignore
//! use shapecache::{Color, ShapeIterators, ShapeStore, StoreConfig};
//!
//! let mut store = ShapeStore::new(StoreConfig::new("239.0.0.66", 2416));
//! store.open(None)?;
//!
//! store.add_point(Color::new(0xFF, 0, 0), 123.45, 98.76)?;
//!
//! store.enumerate(
//!     ShapeIterators::new()
//!         .on_point(|color, x, y| { println!("{:?} at ({}, {})", color, x, y); true })
//!         .on_circle(|_, _, _, _| true)
//!         .on_polygon(|_, _, _| true),
//! )?;
//!
//! store.close()?;
//! ```
//!
//! # Architecture
//!
//! - `shapecache-core`: ids, type tags, errors, codec registry and the
//!   replicated cache contract
//! - `shapecache-replica`: an in-process implementation of that contract
//! - `shapecache-shapes`: the shape types, their codecs and the store facade

pub use shapecache_core::{
    ChangeListener, CodecRegistry, Error, GroupAddress, RecordCodec, RecordId, RecordVisitor,
    ReplicatedCache, Result, TypeTag,
};
pub use shapecache_replica::LocalCache;
pub use shapecache_shapes::*;
