//! Shape store facade
//!
//! `ShapeStore` is the public entry point. It turns typed requests into
//! generic cache operations (mint id, put, publish) and turns the cache's
//! untyped enumeration back into typed iterator calls.
//!
//! ## Lifecycle
//!
//! ```text
//! Unopened --open()--> Open --close()--> Closed
//! ```
//!
//! Every operation other than `open` fails with `NotOpen` unless the store
//! is open. `Closed` is terminal: a closed store cannot be reopened, create
//! a new one instead.

use crate::circle::Circle;
use crate::color::Color;
use crate::config::StoreConfig;
use crate::dispatch::{dispatch, ShapeIterators};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::registry::shape_registry;
use crate::shape::{Shape, ShapeKind};
use shapecache_core::{ChangeListener, Error, RecordId, ReplicatedCache, Result};
use shapecache_replica::LocalCache;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback fired when the locally observed set of shapes changed
///
/// Runs on the thread the cache delivers changes on.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Externally visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// Created, `open` not yet called
    Unopened,
    /// Joined to the replication group
    Open,
    /// Torn down; terminal
    Closed,
}

enum StoreState<C> {
    Unopened,
    Open(C),
    Closed,
}

/// Replicated set of colored shapes
pub struct ShapeStore<C: ReplicatedCache<Shape> = LocalCache<Shape>> {
    config: StoreConfig,
    state: StoreState<C>,
}

impl ShapeStore<LocalCache<Shape>> {
    /// Create an unopened store backed by the in-process replicated cache
    pub fn new(config: StoreConfig) -> Self {
        Self::with_backend(config)
    }
}

impl<C: ReplicatedCache<Shape>> ShapeStore<C> {
    /// Create an unopened store backed by cache type `C`
    pub fn with_backend(config: StoreConfig) -> Self {
        ShapeStore {
            config,
            state: StoreState::Unopened,
        }
    }

    /// Configuration this store was created with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn status(&self) -> StoreStatus {
        match self.state {
            StoreState::Unopened => StoreStatus::Unopened,
            StoreState::Open(_) => StoreStatus::Open,
            StoreState::Closed => StoreStatus::Closed,
        }
    }

    /// Whether the store is open
    pub fn is_open(&self) -> bool {
        matches!(self.state, StoreState::Open(_))
    }

    /// Underlying cache handle, while open
    pub fn backend(&self) -> Option<&C> {
        match &self.state {
            StoreState::Open(cache) => Some(cache),
            _ => None,
        }
    }

    /// Join the configured group and start forwarding change notifications
    ///
    /// `on_change` may be `None`; the store still keeps its local view
    /// refreshed.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` if the store is already open or was closed
    /// - `Config` if the configured address is invalid
    /// - whatever the cache reports when joining or registering the listener
    pub fn open(&mut self, on_change: Option<ChangeCallback>) -> Result<()> {
        match self.state {
            StoreState::Unopened => {}
            StoreState::Open(_) => {
                return Err(Error::InvalidOperation("store already open".to_string()));
            }
            StoreState::Closed => {
                return Err(Error::InvalidOperation(
                    "store was closed; create a new store to reopen".to_string(),
                ));
            }
        }

        self.config.validate()?;
        let address = self.config.address()?;
        let registry = shape_registry()?;
        let cache = C::join(&address, registry).map_err(|e| {
            warn!(group = %address, error = %e, "join failed");
            e
        })?;

        let listener: ChangeListener<C> = Box::new(move |cache: &C| match cache.refresh() {
            Ok(true) => {
                if let Some(callback) = &on_change {
                    callback();
                }
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "refresh after change notification failed"),
        });
        if let Err(e) = cache.add_listener(listener) {
            warn!(group = %address, error = %e, "listener registration failed");
            if let Err(teardown) = cache.teardown() {
                warn!(error = %teardown, "teardown after failed open also failed");
            }
            return Err(e);
        }

        info!(group = %address, transaction = %self.config.transaction, "shape store open");
        self.state = StoreState::Open(cache);
        Ok(())
    }

    /// Publish a point, returning its id
    pub fn add_point(&self, color: Color, x: f64, y: f64) -> Result<RecordId> {
        let cache = self.cache("add_point")?;
        self.publish(cache, Shape::Point(Point::new(color, x, y)))
    }

    /// Publish a circle, returning its id
    pub fn add_circle(
        &self,
        color: Color,
        center_x: f64,
        center_y: f64,
        radius: f64,
    ) -> Result<RecordId> {
        let cache = self.cache("add_circle")?;
        self.publish(cache, Shape::Circle(Circle::new(color, center_x, center_y, radius)))
    }

    /// Publish a polygon, returning its id
    ///
    /// `vertices` is the flat `x0, y0, x1, y1, ...` buffer and must hold
    /// exactly `2 * vertex_count` values.
    pub fn add_polygon(&self, color: Color, vertex_count: u32, vertices: &[f64]) -> Result<RecordId> {
        let cache = self.cache("add_polygon")?;
        let polygon = Polygon::new(color, vertex_count, vertices.to_vec()).map_err(|e| {
            warn!(operation = "add_polygon", error = %e, "rejected polygon");
            e
        })?;
        self.publish(cache, Shape::Polygon(polygon))
    }

    /// Visit every known shape through its typed iterator
    ///
    /// Returns `Ok(true)` when every shape was visited and `Ok(false)` when
    /// an iterator asked to stop. Visiting order is the cache's.
    ///
    /// # Errors
    ///
    /// - `NotOpen` unless the store is open
    /// - `InvalidArgument` if any of the three iterators is missing; the
    ///   cache is not consulted
    /// - `UnknownVariant` / `VariantMismatch` if a stored record cannot be
    ///   dispatched
    pub fn enumerate(&self, mut iterators: ShapeIterators<'_>) -> Result<bool> {
        let cache = self.cache("enumerate")?;
        if let Err(e) = iterators.require_complete() {
            warn!(operation = "enumerate", ?iterators, "iterators required");
            return Err(e);
        }
        cache
            .for_each(&mut |_, _, tag, shape| dispatch(tag, shape, &mut iterators))
            .map_err(|e| {
                warn!(operation = "enumerate", error = %e, "enumeration aborted");
                e
            })
    }

    /// Snapshot of every known shape with its id
    pub fn shapes(&self) -> Result<Vec<(RecordId, Shape)>> {
        let cache = self.cache("shapes")?;
        let mut shapes = Vec::new();
        cache.for_each(&mut |_, id, tag, shape| match ShapeKind::from_tag(tag) {
            Some(kind) if kind == shape.kind() => {
                shapes.push((id, shape.clone()));
                Ok(true)
            }
            Some(_) => Err(Error::VariantMismatch {
                tag: tag.get(),
                found: shape.kind().name(),
            }),
            None => Err(Error::UnknownVariant(tag.get())),
        })?;
        Ok(shapes)
    }

    /// Leave the group
    ///
    /// The store is `Closed` afterwards even if the cache reports a
    /// teardown failure.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, StoreState::Closed) {
            StoreState::Open(cache) => {
                cache.teardown()?;
                info!(group = %self.config.group, port = self.config.port, "shape store closed");
                Ok(())
            }
            StoreState::Unopened => {
                self.state = StoreState::Unopened;
                warn!(operation = "close", "call open first");
                Err(Error::NotOpen)
            }
            StoreState::Closed => {
                warn!(operation = "close", "store already closed");
                Err(Error::NotOpen)
            }
        }
    }

    fn cache(&self, operation: &'static str) -> Result<&C> {
        match &self.state {
            StoreState::Open(cache) => Ok(cache),
            _ => {
                warn!(operation, status = ?self.status(), "call open first");
                Err(Error::NotOpen)
            }
        }
    }

    fn publish(&self, cache: &C, shape: Shape) -> Result<RecordId> {
        let kind = shape.kind();
        let transaction = self.config.transaction.as_str();

        let result = cache.new_id().and_then(|id| {
            cache.put(transaction, id, kind.type_tag(), shape)?;
            cache.publish(transaction)?;
            Ok(id)
        });
        match &result {
            Ok(id) => debug!(%id, %kind, transaction, "published shape"),
            Err(e) => warn!(%kind, transaction, error = %e, "add failed"),
        }
        result
    }
}

impl<C: ReplicatedCache<Shape>> Drop for ShapeStore<C> {
    fn drop(&mut self) {
        if let StoreState::Open(cache) = &self.state {
            if let Err(e) = cache.teardown() {
                warn!(error = %e, "teardown on drop failed");
            }
        }
    }
}

impl<C: ReplicatedCache<Shape>> fmt::Debug for ShapeStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeStore")
            .field("config", &self.config)
            .field("status", &self.status())
            .finish()
    }
}
