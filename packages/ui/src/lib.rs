//! Shared UI for the notes client: view models, list components and the session
//! context every page reads from.
//!
//! Components never call the network themselves. They subscribe to the caches in
//! [`api::AppState`] and report user actions through event handlers; pages run those
//! actions against the controllers.

pub mod view;
pub use view::{
    group_rows, member_rows, note_rows, preview, GroupControls, GroupRow, ListView, MemberRow,
    NoteRow,
};

mod session;
pub use session::{make_session_store, open_app_state, PlatformStore};

mod auth;
pub use auth::{sign_out_on_expiry, use_app, use_auth, AuthProvider, AuthState, LogoutButton};

mod hooks;
pub use hooks::{use_collection, use_live_state};

mod lists;
pub use lists::{GroupList, MemberList, NoteList};

mod live;
pub use live::{LiveIndicator, LiveSync};

pub mod activity_log;
pub use activity_log::{log_activity, log_failure, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
