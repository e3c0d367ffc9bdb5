//! Shape store integration tests
//!
//! Stores share groups through the in-process replicated cache, so several
//! stores in one test stand in for several processes.

#[path = "../common/mod.rs"]
mod common;

mod config_file;
mod lifecycle;
mod replication;
mod scenarios;
