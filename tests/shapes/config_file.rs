//! Stores configured from `shapes.toml`.

use crate::common::*;
use shapecache::{CONFIG_FILE_NAME, DEFAULT_TRANSACTION};
use tempfile::TempDir;

#[test]
fn store_opens_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let port = unique_port();
    std::fs::write(
        &path,
        format!("group = \"239.1.2.3\"\nport = {}\ntransaction = \"edits\"\n", port),
    )
    .unwrap();

    let config = StoreConfig::from_file(&path).unwrap();
    assert_eq!(config.transaction, "edits");

    let (store, changes) = open_counted(config);
    store.add_circle(Color::new(9, 9, 9), 1.0, 2.0, 3.0).unwrap();
    assert_eq!(changes.count(), 1);
}

#[test]
fn missing_fields_take_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, format!("port = {}\n", unique_port())).unwrap();

    let config = StoreConfig::from_file(&path).unwrap();
    assert_eq!(config.group, GROUP);
    assert_eq!(config.transaction, DEFAULT_TRANSACTION);

    let mut store = ShapeStore::new(config);
    store.open(None).unwrap();
    store.close().unwrap();
}

#[test]
fn invalid_group_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "group = \"192.168.0.1\"\nport = 2416\n").unwrap();

    assert!(matches!(StoreConfig::from_file(&path), Err(Error::Config(_))));
}

#[test]
fn written_config_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let config = isolated_config();

    config.write_to_file(&path).unwrap();

    assert_eq!(StoreConfig::from_file(&path).unwrap(), config);
}
