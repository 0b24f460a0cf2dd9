//! # Durable key-value storage
//!
//! The client persists exactly one thing across reloads: the signed-in session.
//! [`KeyValueStore`] is the small async seam between [`crate::SessionStore`] and the
//! platform's storage:
//!
//! | Backend | Platform | Durability |
//! |---------|----------|------------|
//! | [`crate::MemoryStore`] | any | process lifetime (tests, ephemeral sessions) |
//! | [`crate::FileStore`] | native | one file per key under a base directory |
//! | `IdbStore` | `wasm32` + `web` | browser IndexedDB |
//!
//! Implementations never fail loudly. A read that cannot be served returns `None`
//! and a write that cannot be persisted is dropped, so a broken storage layer
//! degrades to "signed out" rather than crashing the app.

use std::future::Future;

/// Async string-keyed storage used for session persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = ()>;
    fn remove(&self, key: &str) -> impl Future<Output = ()>;
}
