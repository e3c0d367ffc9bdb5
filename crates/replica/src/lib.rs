//! In-process replicated cache for shapecache
//!
//! This crate implements the [`ReplicatedCache`](shapecache_core::ReplicatedCache)
//! contract for caches living in the same process:
//! - GroupBus: one shared bus per multicast group address
//! - Frame: binary format of a published transaction
//! - LocalCache: named transactions, change listeners, refresh, enumeration
//!
//! Records are only ever exchanged as codec-encoded bytes, so a view built
//! by `LocalCache` exercises exactly the encode/decode path a networked
//! cache would.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus;
pub mod frame;
pub mod local;

pub use bus::{FrameSink, GroupBus};
pub use frame::{Frame, FrameEntry};
pub use local::LocalCache;
