//! # IndexedDB key-value store: browser-side session persistence
//!
//! [`IdbStore`] is the [`KeyValueStore`] used on the **web platform**. It keeps the
//! session keys in the browser's IndexedDB via [`rexie`], so a reload restores the
//! signed-in user without another login.
//!
//! ## Database schema
//!
//! | IndexedDB store | Key | Value |
//! |-----------------|-----|-------|
//! | `"session"` | storage key (e.g. `"token"`) | string value |
//!
//! `IdbStore` opens a fresh [`Rexie`] connection on every operation; `Rexie` is not
//! `Clone` and the browser caches IndexedDB connections internally.
//!
//! All errors are swallowed: reads return `None` and writes do nothing.

use crate::kv::KeyValueStore;
use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use wasm_bindgen::JsValue;

const DEFAULT_DB_NAME: &str = "notes-client";
const DB_VERSION: u32 = 1;
const SESSION_STORE: &str = "session";

/// IndexedDB-backed key-value store for the web platform.
#[derive(Clone, Debug)]
pub struct IdbStore {
    db_name: String,
}

impl Default for IdbStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdbStore {
    /// Store backed by the default `"notes-client"` database.
    pub fn new() -> Self {
        Self::with_name(DEFAULT_DB_NAME)
    }

    pub fn with_name(db_name: &str) -> Self {
        Self {
            db_name: db_name.to_string(),
        }
    }

    async fn open_db(&self) -> Result<Rexie, rexie::Error> {
        Rexie::builder(&self.db_name)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(SESSION_STORE))
            .build()
            .await
    }
}

impl KeyValueStore for IdbStore {
    async fn get(&self, key: &str) -> Option<String> {
        let db = self.open_db().await.ok()?;
        let tx = db
            .transaction(&[SESSION_STORE], TransactionMode::ReadOnly)
            .ok()?;
        let store = tx.store(SESSION_STORE).ok()?;

        let value = store.get(JsValue::from_str(key)).await.ok()??;
        serde_wasm_bindgen::from_value(value).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        let Ok(db) = self.open_db().await else {
            return;
        };
        let Ok(tx) = db.transaction(&[SESSION_STORE], TransactionMode::ReadWrite) else {
            return;
        };
        let Ok(store) = tx.store(SESSION_STORE) else {
            return;
        };

        let js_key = JsValue::from_str(key);
        let js_value = JsValue::from_str(value);
        let _ = store.put(&js_value, Some(&js_key)).await;
        let _ = tx.done().await;
    }

    async fn remove(&self, key: &str) {
        let Ok(db) = self.open_db().await else {
            return;
        };
        let Ok(tx) = db.transaction(&[SESSION_STORE], TransactionMode::ReadWrite) else {
            return;
        };
        let Ok(store) = tx.store(SESSION_STORE) else {
            return;
        };

        let _ = store.delete(JsValue::from_str(key)).await;
        let _ = tx.done().await;
    }
}
