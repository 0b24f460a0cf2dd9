//! Hooks bridging `watch` channels into Dioxus signals.

use api::{Collection, CollectionState, LiveState};
use dioxus::prelude::*;

use crate::auth::use_auth;

/// Signal mirroring a cached collection; redraws the component on every refetch.
///
/// The subscription is made once per component instance. When the collection
/// itself changes (another group selected), give the component a new `key`.
pub fn use_collection<T: Clone + 'static>(
    collection: &Collection<T>,
) -> Signal<CollectionState<T>> {
    let collection = collection.clone();
    let mut state = use_signal(|| collection.snapshot());
    use_hook(move || {
        let mut changes = collection.subscribe();
        spawn(async move {
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                state.set(next);
            }
        })
    });
    state
}

/// Signal mirroring the live listener's connection state.
pub fn use_live_state() -> Signal<LiveState> {
    let listener = use_auth().peek().live.clone();
    let mut state = use_signal(|| {
        listener
            .as_ref()
            .map(|listener| listener.state())
            .unwrap_or_default()
    });
    use_hook(move || {
        spawn(async move {
            let Some(listener) = listener else {
                return;
            };
            let mut changes = listener.subscribe();
            while changes.changed().await.is_ok() {
                let next = *changes.borrow_and_update();
                state.set(next);
            }
        })
    });
    state
}
