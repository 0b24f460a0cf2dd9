//! Session context and account controls for the UI.

use api::{AppState, ClientError, LiveListener};
use dioxus::prelude::*;
use store::ClientConfig;

use crate::activity_log::{log_activity, ActivityLog, LogLevel};
use crate::session::{open_app_state, PlatformStore};

/// Authentication state for the application.
#[derive(Clone)]
pub struct AuthState {
    /// Session and caches; `None` until storage has been opened.
    pub app: Option<AppState<PlatformStore>>,
    /// Live update listener, when a live URL is configured.
    pub live: Option<LiveListener>,
    pub signed_in: bool,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            app: None,
            live: None,
            signed_in: false,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn user_email(&self) -> Option<String> {
        self.app.as_ref()?.session().get()?.user_email
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The application state, once storage is open.
pub fn use_app() -> Option<AppState<PlatformStore>> {
    use_auth().read().app.clone()
}

/// Mark the user signed out if `err` means the session is gone.
///
/// Returns whether it did; callers then route to the login page.
pub fn sign_out_on_expiry(mut auth: Signal<AuthState>, err: &ClientError) -> bool {
    if !err.requires_login() {
        return false;
    }
    if let Some(app) = auth.peek().app.as_ref() {
        app.reset();
    }
    auth.write().signed_in = false;
    true
}

/// Provider component that opens the persisted session and restores it.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| Signal::new(ActivityLog::default()));

    let _ = use_resource(move || {
        let config = config.clone();
        async move {
            let app = open_app_state(&config).await;
            let signed_in = app.restore().await;
            tracing::info!(signed_in, base_url = app.client().base_url(), "session restored");
            auth_state.set(AuthState {
                app: Some(app),
                live: LiveListener::from_config(&config.live),
                signed_in,
                loading: false,
            });
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let mut log = crate::activity_log::use_activity_log();

    let onclick = move |_| async move {
        let Some(app) = auth_state.peek().app.clone() else {
            return;
        };
        app.logout().await;
        auth_state.write().signed_in = false;
        log_activity(&mut log, LogLevel::Info, "Signed out");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
