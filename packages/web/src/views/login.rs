//! Login page view with an email/password form.

use dioxus::prelude::*;
use ui::{log_activity, use_activity_log, use_auth, LogLevel};

use crate::Route;

pub(crate) const FORM_STYLE: &str = r#"
.auth-page { display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; }
.auth-page h1 { margin-bottom: 0.5rem; color: #37352f; font-size: 1.75rem; }
.auth-form { display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 320px; }
.auth-form input { padding: 0.5rem 0.625rem; border: 1px solid #e3e2e0; border-radius: 4px; font-size: 0.9375rem; }
.auth-form button { padding: 0.625rem; border: none; border-radius: 4px; background: #2383e2; color: white; font-size: 0.9375rem; cursor: pointer; }
.auth-form button:disabled { opacity: 0.5; cursor: not-allowed; }
.auth-error { padding: 0.625rem; background: #fdebec; border: 1px solid #f4c7c7; border-radius: 4px; color: #d44c47; font-size: 0.8125rem; }
.auth-switch { margin-top: 1.5rem; font-size: 0.875rem; color: #787774; }
"#;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut log = use_activity_log();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in (restored session): go straight to the notes.
    if !auth().loading && auth().signed_in {
        navigator().replace(Route::Notes {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }
            let Some(app) = auth.peek().app.clone() else {
                error.set(Some("Still starting up, try again".to_string()));
                return;
            };

            loading.set(true);
            match app.login(&e, &p).await {
                Ok(_) => {
                    auth.write().signed_in = true;
                    log_activity(&mut log, LogLevel::Success, "Signed in");
                    navigator().replace(Route::Notes {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        style { {FORM_STYLE} }

        div {
            class: "auth-page",

            h1 { "Sign in" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading() || auth().loading,
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-switch",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
