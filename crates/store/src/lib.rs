//! # Canteen Store
//!
//! Durable local key-value storage for the ordering client: the
//! browser-profile equivalent of the web app's persisted session state.
//! The session layer snapshots its committed selection here so a page
//! reload (or a second tab, at its own next mount) can pick it back up.
//!
//! Semantics are deliberately simple: flat string keys, last-write-wins,
//! no cross-context locking.

pub mod file;
pub mod mock;

use eyre::Result;

pub use file::FileStore;

/// Get/set/remove by key. Values are opaque strings; callers decide the
/// encoding (the session layer stores JSON).
pub trait SnapshotStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}
