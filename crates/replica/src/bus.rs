//! In-process group directory and frame bus
//!
//! Every cache joined to the same [`GroupAddress`] shares one [`GroupBus`].
//! Publishing hands a frame to the bus, which delivers it to every live
//! member, the publisher included.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use shapecache_core::GroupAddress;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

// =============================================================================
// Global Group Directory
// =============================================================================
//
// Joining the same group twice returns the same bus. The directory holds
// weak references so a group disappears once its last member is gone.

/// Global directory of live groups (address -> weak reference)
static GROUPS: Lazy<Mutex<HashMap<GroupAddress, Weak<GroupBus>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Receiver side of a group member.
pub trait FrameSink: Send + Sync {
    /// Accept an encoded frame published to the group.
    fn deliver(&self, frame: Arc<[u8]>);
}

/// Shared medium for one replication group.
pub struct GroupBus {
    address: GroupAddress,
    members: Mutex<Vec<(u64, Weak<dyn FrameSink>)>>,
    next_member: AtomicU64,
}

impl GroupBus {
    /// Get the bus for `address`, creating it if no member is alive.
    pub fn join(address: &GroupAddress) -> Arc<GroupBus> {
        let mut groups = GROUPS.lock();
        if let Some(bus) = groups.get(address).and_then(Weak::upgrade) {
            return bus;
        }

        groups.retain(|_, bus| bus.strong_count() > 0);
        let bus = Arc::new(GroupBus {
            address: *address,
            members: Mutex::new(Vec::new()),
            next_member: AtomicU64::new(1),
        });
        groups.insert(*address, Arc::downgrade(&bus));
        debug!(group = %address, "created group bus");
        bus
    }

    /// Address this bus serves.
    pub fn address(&self) -> &GroupAddress {
        &self.address
    }

    /// Reserve a member id.
    pub fn allocate_member(&self) -> u64 {
        self.next_member.fetch_add(1, Ordering::Relaxed)
    }

    /// Start delivering frames to `sink`.
    pub fn subscribe(&self, member: u64, sink: Weak<dyn FrameSink>) {
        self.members.lock().push((member, sink));
    }

    /// Stop delivering frames to `member`.
    pub fn unsubscribe(&self, member: u64) {
        self.members.lock().retain(|(id, _)| *id != member);
    }

    /// Number of live members.
    pub fn member_count(&self) -> usize {
        self.members
            .lock()
            .iter()
            .filter(|(_, sink)| sink.strong_count() > 0)
            .count()
    }

    /// Deliver `frame` to every live member.
    ///
    /// Sinks are called after the member list lock is released, so a sink may
    /// publish again from inside `deliver`.
    pub fn broadcast(&self, frame: Vec<u8>) -> usize {
        let frame: Arc<[u8]> = frame.into();
        let sinks: Vec<Arc<dyn FrameSink>> = {
            let mut members = self.members.lock();
            members.retain(|(_, sink)| sink.strong_count() > 0);
            members.iter().filter_map(|(_, sink)| sink.upgrade()).collect()
        };

        trace!(group = %self.address, members = sinks.len(), bytes = frame.len(), "broadcast");
        for sink in &sinks {
            sink.deliver(Arc::clone(&frame));
        }
        sinks.len()
    }
}

impl std::fmt::Debug for GroupBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupBus")
            .field("address", &self.address)
            .field("member_count", &self.member_count())
            .finish()
    }
}
