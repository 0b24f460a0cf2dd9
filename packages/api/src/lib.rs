//! # API crate: the notes backend, seen from the client
//!
//! Everything the frontends need to talk to the notes REST API: an authenticated
//! request client that refreshes expired tokens on its own, resource controllers with
//! a refetch-after-mutation cache, and the listener that turns live notifications into
//! refetches.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | — | `ApiClient`: bearer auth, one refresh-and-retry on 401, error extraction |
//! | [`auth`] | — | Login, registration, logout and account updates |
//! | [`cache`] | — | `Collection`, the observable last-fetched list of a resource |
//! | [`resource`] | — | Generic list/create/update/delete with resync after each mutation |
//! | [`notes`], [`groups`] | — | Notes, groups and memberships controllers |
//! | [`state`] | — | `AppState`: the session plus every cache, reset together |
//! | [`live`] | `web` for the browser socket | Live update listener |
//! | [`routes`] | — | Endpoint paths |
//!
//! ## Request flow
//!
//! ```text
//! controller ──▶ ApiClient::request ──▶ backend
//!                     │ 401
//!                     ▼
//!               POST /token/refresh ──ok──▶ retry once with the new token
//!                     │ failed
//!                     ▼
//!               clear session, SessionExpired
//! ```

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod groups;
pub mod live;
pub mod notes;
pub mod resource;
pub mod routes;
pub mod state;

pub use cache::{Collection, CollectionState};
pub use client::{Access, ApiClient};
pub use error::{ClientError, Result};
pub use groups::{Groups, Members};
pub use live::{
    ChannelConnector, Invalidation, LiveConnector, LiveListener, LiveMessage, LiveState,
};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use live::{WebSocketConnector, WebSocketFrames};
pub use notes::Notes;
pub use resource::Resource;
pub use routes::Routes;
pub use state::{ActiveGroup, AppState};
