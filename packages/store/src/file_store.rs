//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is the native [`KeyValueStore`]: every key is a small file holding
//! its value, so the session survives app restarts.
//!
//! ```text
//! <base_dir>/
//! ├── token
//! ├── refreshToken
//! ├── userId
//! └── userEmail
//! ```
//!
//! Use [`dirs::data_dir()`](https://docs.rs/dirs) for a platform-appropriate base,
//! e.g. `~/.local/share/notes-client/session/` on Linux.

use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;

/// Filesystem-backed key-value store for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!(path = %self.base.display(), "cannot create store directory: {e}");
            return;
        }
        if let Err(e) = std::fs::write(self.entry_path(key), value) {
            tracing::warn!(key, "cannot persist entry: {e}");
        }
    }

    async fn remove(&self, key: &str) {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, "cannot remove entry: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("session");

        let store = FileStore::new(base.clone());
        store.set("token", "a1").await;
        store.set("userId", "u1").await;

        let reopened = FileStore::new(base);
        assert_eq!(reopened.get("token").await.as_deref(), Some("a1"));
        assert_eq!(reopened.get("userId").await.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.remove("refreshToken").await;
        assert!(store.get("refreshToken").await.is_none());

        store.set("refreshToken", "r1").await;
        store.remove("refreshToken").await;
        assert!(store.get("refreshToken").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_remove_leaves_other_entries_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.set("userId", "u1").await;
        std::fs::create_dir(dir.path().join("token")).unwrap();

        store.remove("token").await;
        store.remove("userId").await;

        assert!(dir.path().join("token").is_dir());
        assert!(store.get("userId").await.is_none());
    }
}
