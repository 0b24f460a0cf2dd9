//! Shared session-storage constructor for all platforms.
//!
//! Returns the [`store::KeyValueStore`] the session is persisted in:
//! - **Web** (WASM + `web` feature): IndexedDB via [`store::IdbStore`]
//! - **Desktop / dev** (native): one file per key via [`store::FileStore`]
//! - **WASM without `web`**: [`store::MemoryStore`], lost on reload

use api::AppState;
use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::IdbStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

/// Create the platform's session storage.
///
/// On native targets the files live under `<data_dir>/notes-client/session/`.
pub fn make_session_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::IdbStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("notes-client")
            .join("session");
        store::FileStore::new(base)
    }
}

/// Open the persisted session and build the application state around it.
pub async fn open_app_state(config: &ClientConfig) -> AppState<PlatformStore> {
    AppState::open(config, make_session_store()).await
}
