pub mod config;
pub mod kv;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

pub use config::{ApiConfig, ClientConfig, GroupSegment, LiveConfig};
pub use kv::KeyValueStore;
pub use models::{
    AccountUpdate, Credentials, Group, GroupCapabilities, GroupDraft, GroupRename, Membership,
    NewMember, Note, NoteDraft, NoteScope, Role, UserInfo,
};
pub use session::{Session, SessionStore};
