//! In-process replicated cache
//!
//! `LocalCache` implements [`ReplicatedCache`] on top of a [`GroupBus`]:
//!
//! - `put` stages a record in a named transaction
//! - `publish` encodes the transaction into a [`Frame`] and broadcasts it
//! - each member queues received frames and notifies its listeners
//! - `refresh` decodes queued frames into the local view, one whole
//!   transaction at a time
//!
//! Every member, the publisher included, builds its view from decoded
//! frames only. Records never cross members by reference.

use crate::bus::{FrameSink, GroupBus};
use crate::frame::{Frame, FrameEntry};
use parking_lot::{Mutex, RwLock};
use shapecache_core::{
    ChangeListener, CodecRegistry, Error, GroupAddress, RecordId, RecordVisitor, ReplicatedCache,
    Result, TypeTag,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

type SharedListener<R> = Arc<dyn Fn(&LocalCache<R>) + Send + Sync>;

/// A record held in the local view
struct StoredRecord<R> {
    tag: TypeTag,
    record: R,
    /// Arrival order, used for enumeration
    seq: u64,
}

/// A record staged in a transaction
struct PendingPut<R> {
    id: RecordId,
    tag: TypeTag,
    record: R,
}

struct CacheInner<R> {
    address: GroupAddress,
    registry: CodecRegistry<R>,
    bus: Arc<GroupBus>,
    member: u64,
    self_ref: Weak<CacheInner<R>>,
    transactions: Mutex<HashMap<String, Vec<PendingPut<R>>>>,
    inbox: Mutex<VecDeque<Arc<[u8]>>>,
    view: RwLock<HashMap<RecordId, StoredRecord<R>>>,
    listeners: RwLock<Vec<SharedListener<R>>>,
    next_seq: AtomicU64,
    torn_down: AtomicBool,
}

/// Cache handle replicating through an in-process group bus
///
/// Handles are cheap to clone; clones share the same member state.
pub struct LocalCache<R> {
    inner: Arc<CacheInner<R>>,
}

impl<R> Clone for LocalCache<R> {
    fn clone(&self) -> Self {
        LocalCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> LocalCache<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// Group this cache joined
    pub fn address(&self) -> &GroupAddress {
        &self.inner.address
    }

    /// Number of records in the local view
    pub fn len(&self) -> usize {
        self.inner.view.read().len()
    }

    /// Check if the local view is empty
    pub fn is_empty(&self) -> bool {
        self.inner.view.read().is_empty()
    }

    /// Number of frames received but not yet applied
    pub fn pending_frames(&self) -> usize {
        self.inner.inbox.lock().len()
    }

    /// Whether `teardown` has been called
    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::Acquire)
    }

    /// Apply `f` to the record stored under `id`, if any
    pub fn with_record<T>(&self, id: RecordId, f: impl FnOnce(TypeTag, &R) -> T) -> Option<T> {
        self.inner
            .view
            .read()
            .get(&id)
            .map(|stored| f(stored.tag, &stored.record))
    }

    fn ensure_live(&self, operation: &str) -> Result<()> {
        if self.is_torn_down() {
            return Err(Error::collaborator(format!(
                "{}: cache for {} was torn down",
                operation, self.inner.address
            )));
        }
        Ok(())
    }

    fn encode_transaction(&self, pending: Vec<PendingPut<R>>) -> Result<Frame> {
        let registry = &self.inner.registry;
        let mut frame = Frame::with_capacity(pending.len());
        let mut failure = None;

        for put in pending {
            if failure.is_none() {
                let mut payload = Vec::new();
                match registry.encode(put.tag, &put.record, &mut payload) {
                    Ok(()) => frame.push(put.id, put.tag.get(), payload),
                    Err(e) => failure = Some(e),
                }
            }
            // The local copy comes back through the bus; the staged one is done.
            registry.release(put.tag, put.record);
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(frame),
        }
    }

    /// Decode one frame and commit it to the view as a whole.
    ///
    /// Returns the number of entries applied. On error the view is left
    /// exactly as it was.
    fn apply_frame(&self, bytes: &[u8]) -> Result<usize> {
        let frame = Frame::from_bytes(bytes)?;
        let registry = &self.inner.registry;
        let mut view = self.inner.view.write();

        let mut staged = Vec::with_capacity(frame.len());
        if let Err(e) = self.stage_entries(&view, frame.entries, &mut staged) {
            for (_, tag, record) in staged {
                registry.release(tag, record);
            }
            return Err(e);
        }

        let applied = staged.len();
        for (id, tag, record) in staged {
            // A replaced record keeps its original position.
            let seq = match view.get(&id) {
                Some(old) => old.seq,
                None => self.inner.next_seq.fetch_add(1, Ordering::Relaxed),
            };
            if let Some(old) = view.insert(id, StoredRecord { tag, record, seq }) {
                registry.release(old.tag, old.record);
            }
        }
        Ok(applied)
    }

    /// Decode every entry of a frame without touching the view.
    ///
    /// A record already stored under the same tag is refreshed through a
    /// copy, so a failed refresh never leaves a half-decoded record visible.
    fn stage_entries(
        &self,
        view: &HashMap<RecordId, StoredRecord<R>>,
        entries: Vec<FrameEntry>,
        staged: &mut Vec<(RecordId, TypeTag, R)>,
    ) -> Result<()> {
        let registry = &self.inner.registry;
        for entry in entries {
            let tag = registry.resolve(entry.tag)?;
            let mut source: &[u8] = &entry.payload;

            let record = match view.get(&entry.id) {
                Some(existing) if existing.tag == tag => {
                    let mut copy = existing.record.clone();
                    if let Err(e) = registry.decode_into(tag, &mut source, &mut copy) {
                        registry.release(tag, copy);
                        return Err(e);
                    }
                    copy
                }
                _ => registry.decode_new(tag, &mut source)?,
            };
            staged.push((entry.id, tag, record));
            ensure_consumed(source)?;
        }
        Ok(())
    }
}

fn ensure_consumed(rest: &[u8]) -> Result<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::DecodeFailure(format!(
            "{} bytes left over after record",
            rest.len()
        )))
    }
}

impl<R> FrameSink for CacheInner<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn deliver(&self, frame: Arc<[u8]>) {
        if self.torn_down.load(Ordering::Acquire) {
            return;
        }
        self.inbox.lock().push_back(frame);

        let Some(inner) = self.self_ref.upgrade() else {
            return;
        };
        let listeners: Vec<SharedListener<R>> = self.listeners.read().clone();
        let cache = LocalCache { inner };
        for listener in listeners {
            listener(&cache);
        }
    }
}

impl<R> ReplicatedCache<R> for LocalCache<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn join(address: &GroupAddress, registry: CodecRegistry<R>) -> Result<Self> {
        if registry.is_empty() {
            return Err(Error::collaborator(format!(
                "cannot join {} without codecs",
                address
            )));
        }

        let bus = GroupBus::join(address);
        let member = bus.allocate_member();
        let inner = Arc::new_cyclic(|self_ref| CacheInner {
            address: *address,
            registry,
            bus: Arc::clone(&bus),
            member,
            self_ref: self_ref.clone(),
            transactions: Mutex::new(HashMap::new()),
            inbox: Mutex::new(VecDeque::new()),
            view: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
            next_seq: AtomicU64::new(0),
            torn_down: AtomicBool::new(false),
        });
        let sink: Weak<dyn FrameSink> = Arc::downgrade(&inner) as Weak<dyn FrameSink>;
        bus.subscribe(member, sink);

        info!(group = %address, member, codecs = inner.registry.len(), "joined group");
        Ok(LocalCache { inner })
    }

    fn add_listener(&self, listener: ChangeListener<Self>) -> Result<()> {
        self.ensure_live("add_listener")?;
        self.inner.listeners.write().push(Arc::from(listener));
        Ok(())
    }

    fn new_id(&self) -> Result<RecordId> {
        self.ensure_live("new_id")?;
        Ok(RecordId::new())
    }

    fn put(&self, transaction: &str, id: RecordId, tag: TypeTag, record: R) -> Result<()> {
        self.ensure_live("put")?;
        if !self.inner.registry.is_registered(tag) {
            return Err(Error::UnknownVariant(tag.get()));
        }
        self.inner
            .transactions
            .lock()
            .entry(transaction.to_string())
            .or_default()
            .push(PendingPut { id, tag, record });
        Ok(())
    }

    fn publish(&self, transaction: &str) -> Result<()> {
        self.ensure_live("publish")?;
        let pending = self
            .inner
            .transactions
            .lock()
            .remove(transaction)
            .unwrap_or_default();
        if pending.is_empty() {
            debug!(transaction, "nothing to publish");
            return Ok(());
        }

        let frame = self.encode_transaction(pending)?;
        let bytes = frame.to_bytes()?;
        let delivered = self.inner.bus.broadcast(bytes);
        debug!(
            group = %self.inner.address,
            transaction,
            records = frame.len(),
            delivered,
            "published transaction"
        );
        Ok(())
    }

    fn for_each(&self, visitor: &mut RecordVisitor<'_, R>) -> Result<bool> {
        self.ensure_live("for_each")?;
        // Visit a cloned snapshot so visitors may call back into the cache.
        let mut snapshot: Vec<(u64, RecordId, TypeTag, R)> = self
            .inner
            .view
            .read()
            .iter()
            .map(|(id, stored)| (stored.seq, *id, stored.tag, stored.record.clone()))
            .collect();
        snapshot.sort_by_key(|(seq, ..)| *seq);

        for (index, (_, id, tag, record)) in snapshot.iter().enumerate() {
            if !visitor(index, *id, *tag, record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn refresh(&self) -> Result<bool> {
        self.ensure_live("refresh")?;
        let mut changed = false;
        let mut first_error = None;
        loop {
            let Some(frame) = self.inner.inbox.lock().pop_front() else {
                break;
            };
            match self.apply_frame(&frame) {
                Ok(applied) => changed |= applied > 0,
                Err(e) => {
                    warn!(
                        group = %self.inner.address,
                        error = %e,
                        codec = e.is_codec_error(),
                        "discarded frame"
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        // Listeners must still hear about frames that did apply.
        match first_error {
            Some(e) if !changed => Err(e),
            _ => Ok(changed),
        }
    }

    fn teardown(&self) -> Result<()> {
        if self.inner.torn_down.swap(true, Ordering::AcqRel) {
            return Err(Error::collaborator(format!(
                "cache for {} already torn down",
                self.inner.address
            )));
        }
        self.inner.bus.unsubscribe(self.inner.member);

        let registry = &self.inner.registry;
        let stored: Vec<StoredRecord<R>> = self.inner.view.write().drain().map(|(_, s)| s).collect();
        let released = stored.len();
        for record in stored {
            registry.release(record.tag, record.record);
        }
        let pending: Vec<PendingPut<R>> = self
            .inner
            .transactions
            .lock()
            .drain()
            .flat_map(|(_, puts)| puts)
            .collect();
        for put in pending {
            registry.release(put.tag, put.record);
        }
        self.inner.inbox.lock().clear();
        self.inner.listeners.write().clear();

        info!(group = %self.inner.address, member = self.inner.member, released, "left group");
        Ok(())
    }
}

impl<R> std::fmt::Debug for LocalCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache")
            .field("address", &self.inner.address)
            .field("member", &self.inner.member)
            .field("records", &self.inner.view.read().len())
            .field("torn_down", &self.inner.torn_down.load(Ordering::Relaxed))
            .finish()
    }
}
