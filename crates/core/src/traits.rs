//! Replicated cache contract
//!
//! The shape layer never talks to a transport directly. Everything it needs
//! from the replicated cache (group membership, unique ids, transactions,
//! change notification, enumeration) goes through [`ReplicatedCache`].

use crate::error::Result;
use crate::registry::CodecRegistry;
use crate::types::{GroupAddress, RecordId, TypeTag};

/// Listener invoked by the cache when the locally observed state may have changed
///
/// The listener receives the cache handle so it can call
/// [`ReplicatedCache::refresh`]. It runs on whatever thread the cache
/// delivers changes on.
pub type ChangeListener<C> = Box<dyn Fn(&C) + Send + Sync>;

/// Visitor passed to [`ReplicatedCache::for_each`]
///
/// Arguments are `(index, id, tag, record)`. Returning `Ok(false)` stops the
/// enumeration; an error aborts it.
pub type RecordVisitor<'a, R> = dyn FnMut(usize, RecordId, TypeTag, &R) -> Result<bool> + 'a;

/// Replicated key-value cache holding opaque, tag-typed records
///
/// Implementations encode, decode and release records exclusively through
/// the [`CodecRegistry`] they were joined with.
pub trait ReplicatedCache<R>: Send + Sync + Sized + 'static {
    /// Join (or create) the replication group at `address`.
    fn join(address: &GroupAddress, registry: CodecRegistry<R>) -> Result<Self>;

    /// Register a change listener.
    fn add_listener(&self, listener: ChangeListener<Self>) -> Result<()>;

    /// Mint a fresh record identifier.
    fn new_id(&self) -> Result<RecordId>;

    /// Stage `record` under `id` in the named transaction.
    fn put(&self, transaction: &str, id: RecordId, tag: TypeTag, record: R) -> Result<()>;

    /// Commit and replicate the named transaction.
    fn publish(&self, transaction: &str) -> Result<()>;

    /// Visit every record in the local view.
    ///
    /// Returns `Ok(true)` when every record was visited and `Ok(false)` when
    /// the visitor stopped early.
    fn for_each(&self, visitor: &mut RecordVisitor<'_, R>) -> Result<bool>;

    /// Apply pending replicated changes to the local view.
    ///
    /// Each published transaction is applied as a whole or not at all.
    /// Returns whether the local view changed. A transaction that cannot
    /// be applied is dropped; its error is returned only when nothing else
    /// changed the view.
    fn refresh(&self) -> Result<bool>;

    /// Leave the group and release every record.
    fn teardown(&self) -> Result<()>;
}
