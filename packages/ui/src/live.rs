//! Live update status and the task that keeps the live channel running.

use api::{AppState, LiveListener, LiveState};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::hooks::use_live_state;
use crate::session::PlatformStore;

/// A small dot showing whether live updates are flowing.
///
/// - **Connected**: green ("Live")
/// - **Connecting**: amber ("Connecting")
/// - **Disconnected**: gray; lists still refresh after your own changes
#[component]
pub fn LiveIndicator() -> Element {
    let state = use_live_state();
    let (color, title) = match state() {
        LiveState::Connected => ("#2e9e5b", "Live"),
        LiveState::Connecting => ("#d9a21b", "Connecting"),
        LiveState::Disconnected => ("#b4b4b0", "Live updates off"),
    };

    rsx! {
        span {
            class: "live-indicator",
            title: "{title}",
            style: "display: inline-block; width: 8px; height: 8px; border-radius: 50%; background: {color};",
        }
    }
}

/// Runs the live listener while mounted, reconnecting when the selected group
/// changes. Renders nothing. Unmounting (logout) stops it.
#[component]
pub fn LiveSync() -> Element {
    let auth = use_auth();
    use_hook(move || {
        let state = auth.peek().clone();
        spawn(async move {
            let (Some(app), Some(listener)) = (state.app, state.live) else {
                return;
            };
            drive(app, listener).await;
        })
    });
    rsx! {}
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
async fn drive(app: AppState<PlatformStore>, listener: LiveListener) {
    use futures::future::{select, Either};

    let connector = api::WebSocketConnector;
    let mut selection = app.subscribe_active();
    loop {
        let run = listener.run(&app, &connector);
        let changed = selection.changed();
        futures::pin_mut!(run, changed);
        match select(run, changed).await {
            Either::Left((Ok(()), _)) => {
                tracing::info!("live channel closed");
                return;
            }
            Either::Left((Err(e), _)) => {
                tracing::warn!("live updates stopped: {e}");
                return;
            }
            Either::Right((Ok(()), _)) => continue,
            Either::Right((Err(_), _)) => return,
        }
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
async fn drive(_app: AppState<PlatformStore>, listener: LiveListener) {
    tracing::debug!(state = ?listener.state(), "live updates need the browser WebSocket");
}
