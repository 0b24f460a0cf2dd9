use dioxus::prelude::*;

use store::ClientConfig;
use ui::AuthProvider;
use views::{Groups, Login, Notes, Register, Shell};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Shell)]
        #[route("/")]
        Notes {},
        #[route("/groups")]
        Groups {},
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(client_config);

    rsx! {
        document::Title { "Notes" }

        AuthProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Native builds read the environment (and `.env`); browser builds bake the same
/// variables in at compile time.
fn client_config() -> ClientConfig {
    #[cfg(not(target_arch = "wasm32"))]
    let config = ClientConfig::from_env();
    #[cfg(target_arch = "wasm32")]
    let config = ClientConfig::from_lookup(|key| {
        match key {
            "NOTES_API_URL" => option_env!("NOTES_API_URL"),
            "NOTES_GROUP_SEGMENT" => option_env!("NOTES_GROUP_SEGMENT"),
            "NOTES_LIVE_URL" => option_env!("NOTES_LIVE_URL"),
            _ => None,
        }
        .map(str::to_string)
    });

    tracing::info!(
        api = %config.api.base_url,
        segment = config.api.group_segment.as_str(),
        live = config.live.url.is_some(),
        "client configured"
    );
    config
}
