//! Core types and traits for shapecache
//!
//! This crate defines the foundational types used throughout the system:
//! - RecordId: Unique identifier for replicated records
//! - TypeTag: Discriminates between record variants
//! - GroupAddress: Multicast group a cache joins
//! - Error: Error type hierarchy
//! - wire: Fixed-width wire primitives shared by every codec
//! - RecordCodec / CodecRegistry: tag-keyed encode/decode/release
//! - ReplicatedCache: the contract a replicated cache fulfils

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;
pub mod wire;

pub use codec::RecordCodec;
pub use error::{Error, Result};
pub use registry::CodecRegistry;
pub use traits::{ChangeListener, RecordVisitor, ReplicatedCache};
pub use types::{GroupAddress, RecordId, TypeTag};
