//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::cell::RefCell;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;

pub use shapecache::{
    ChangeCallback, Color, Error, RecordId, ShapeIterators, ShapeStore, StoreConfig, StoreStatus,
};

pub const GROUP: &str = "239.0.0.66";

static NEXT_PORT: AtomicU16 = AtomicU16::new(43000);

/// Port no other test in this process uses, so every test gets its own group.
pub fn unique_port() -> u16 {
    NEXT_PORT.fetch_add(1, Ordering::SeqCst)
}

/// Config for a fresh, unshared group.
pub fn isolated_config() -> StoreConfig {
    StoreConfig::new(GROUP, unique_port())
}

// ============================================================================
// Change notifications
// ============================================================================

/// Counts change notifications delivered to a store.
#[derive(Clone, Default)]
pub struct ChangeCounter {
    count: Arc<AtomicUsize>,
}

impl ChangeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> ChangeCallback {
        let count = Arc::clone(&self.count);
        Arc::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Open a store on `config`, counting its change notifications.
pub fn open_counted(config: StoreConfig) -> (ShapeStore, ChangeCounter) {
    let counter = ChangeCounter::new();
    let mut store = ShapeStore::new(config);
    store.open(Some(counter.callback())).unwrap();
    (store, counter)
}

// ============================================================================
// Enumeration
// ============================================================================

/// What an iterator was called with.
#[derive(Debug, Clone, PartialEq)]
pub enum Visited {
    Point(Color, f64, f64),
    Circle(Color, f64, f64, f64),
    Polygon(Color, u32, Vec<f64>),
}

/// Enumerate every shape, recording each iterator call in visiting order.
pub fn visit_all(store: &ShapeStore) -> Vec<Visited> {
    let visited = RefCell::new(Vec::new());
    let completed = store
        .enumerate(
            ShapeIterators::new()
                .on_point(|c, x, y| {
                    visited.borrow_mut().push(Visited::Point(c, x, y));
                    true
                })
                .on_circle(|c, x, y, r| {
                    visited.borrow_mut().push(Visited::Circle(c, x, y, r));
                    true
                })
                .on_polygon(|c, n, v| {
                    visited.borrow_mut().push(Visited::Polygon(c, n, v.to_vec()));
                    true
                }),
        )
        .unwrap();
    assert!(completed);
    visited.into_inner()
}
