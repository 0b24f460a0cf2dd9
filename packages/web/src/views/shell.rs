//! Signed-in page layout: navigation, live status, account and activity log.

use dioxus::prelude::*;
use ui::{use_auth, ActivityLogPanel, ActivityLogToggle, LiveIndicator, LiveSync, LogoutButton};

use crate::Route;

const SHELL_STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; color: #37352f; }
.shell-header { display: flex; align-items: center; justify-content: space-between; padding: 0.5rem 1.5rem; border-bottom: 1px solid #e3e2e0; }
.shell-nav { display: flex; gap: 1rem; }
.shell-nav a { color: #37352f; text-decoration: none; font-weight: 500; }
.shell-user { display: flex; align-items: center; gap: 0.75rem; font-size: 0.875rem; color: #787774; }
.shell-main { max-width: 56rem; margin: 0 auto; padding: 1.5rem; }
.shell-loading { padding: 2rem; color: #787774; }
"#;

/// Wraps every page that needs a session. Pages below it can rely on the
/// application state being open.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {
            style { {SHELL_STYLE} }
            p { class: "shell-loading", "Loading..." }
        };
    }

    if !state.signed_in {
        navigator().replace(Route::Login {});
        return rsx! {};
    }

    let email = state.user_email().unwrap_or_default();

    rsx! {
        style { {SHELL_STYLE} }

        header {
            class: "shell-header",
            nav {
                class: "shell-nav",
                Link { to: Route::Notes {}, "My notes" }
                Link { to: Route::Groups {}, "Groups" }
            }
            div {
                class: "shell-user",
                LiveIndicator {}
                span { "{email}" }
                LogoutButton {}
            }
        }

        main {
            class: "shell-main",
            Outlet::<Route> {}
        }

        LiveSync {}
        ActivityLogToggle {}
        ActivityLogPanel {}
    }
}
