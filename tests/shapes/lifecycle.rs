//! Open / close state machine.

use crate::common::*;

#[test]
fn add_before_open_fails() {
    let store = ShapeStore::new(isolated_config());
    assert_eq!(
        store.add_circle(Color::new(0, 0xFF, 0), 400.0, 400.0, 75.0),
        Err(Error::NotOpen)
    );
    assert_eq!(store.status(), StoreStatus::Unopened);
}

#[test]
fn closed_store_rejects_everything() {
    let (mut store, _) = open_counted(isolated_config());
    store.add_point(Color::default(), 0.0, 0.0).unwrap();
    store.close().unwrap();

    assert_eq!(store.status(), StoreStatus::Closed);
    assert_eq!(store.add_point(Color::default(), 0.0, 0.0), Err(Error::NotOpen));
    assert!(matches!(store.shapes(), Err(Error::NotOpen)));
    assert_eq!(store.close(), Err(Error::NotOpen));
    assert!(matches!(store.open(None), Err(Error::InvalidOperation(_))));
}

#[test]
fn second_open_is_rejected() {
    let (mut store, _) = open_counted(isolated_config());
    assert!(matches!(store.open(None), Err(Error::InvalidOperation(_))));
    assert!(store.is_open());
}

#[test]
fn non_multicast_group_is_rejected() {
    let mut store = ShapeStore::new(StoreConfig::new("10.0.0.1", unique_port()));
    assert!(matches!(store.open(None), Err(Error::Config(_))));
    assert_eq!(store.status(), StoreStatus::Unopened);
}

#[test]
fn new_store_reuses_group_after_close() {
    let config = isolated_config();
    let (mut first, _) = open_counted(config.clone());
    first.add_point(Color::default(), 1.0, 1.0).unwrap();
    first.close().unwrap();

    let (second, _) = open_counted(config);
    // Published state lives in members, not in the group.
    assert!(second.shapes().unwrap().is_empty());
    second.add_point(Color::default(), 2.0, 2.0).unwrap();
    assert_eq!(second.shapes().unwrap().len(), 1);
}
