//! # Live update listener
//!
//! Out-of-band change notifications from the backend. The listener is a small state
//! machine:
//!
//! ```text
//! Disconnected ──run──▶ Connecting ──connected──▶ Connected ──close/error──▶ Disconnected
//! ```
//!
//! While connected, each text frame is a JSON object tagged by `type`:
//!
//! | `type` | Payload | Effect |
//! |--------|---------|--------|
//! | `noteUpdate` | optional `groupId` | refetch that group's notes if it is active, else personal notes |
//! | `groupUpdate` | — | refetch the group list |
//! | `memberUpdate` | `groupId` | refetch that group's members if it is active |
//!
//! Unknown types and malformed frames are logged and skipped. Frames are handled in
//! arrival order; the last refetch wins. There is no reconnection: when the channel
//! closes the listener returns and the caller decides whether to run it again.

use std::future::Future;
use std::sync::Arc;

use futures::channel::mpsc;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use store::KeyValueStore;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::state::AppState;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_socket;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web_socket::{WebSocketConnector, WebSocketFrames};

/// Connection state of the live channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LiveState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// A decoded notification.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LiveMessage {
    NoteUpdate {
        #[serde(default, rename = "groupId", alias = "group_id", alias = "teamId")]
        group_id: Option<String>,
    },
    GroupUpdate,
    MemberUpdate {
        #[serde(rename = "groupId", alias = "group_id", alias = "teamId")]
        group_id: String,
    },
    #[serde(other)]
    Unknown,
}

/// Which cached collection a notification makes stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invalidation {
    PersonalNotes,
    Groups,
    GroupNotes(String),
    GroupMembers(String),
}

impl LiveMessage {
    pub fn parse(frame: &str) -> Option<Self> {
        match serde_json::from_str(frame) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("dropping malformed live frame: {e}");
                None
            }
        }
    }

    pub fn invalidation(&self) -> Option<Invalidation> {
        match self {
            LiveMessage::NoteUpdate { group_id: None } => Some(Invalidation::PersonalNotes),
            LiveMessage::NoteUpdate {
                group_id: Some(id),
            } => Some(Invalidation::GroupNotes(id.clone())),
            LiveMessage::GroupUpdate => Some(Invalidation::Groups),
            LiveMessage::MemberUpdate { group_id } => {
                Some(Invalidation::GroupMembers(group_id.clone()))
            }
            LiveMessage::Unknown => None,
        }
    }
}

/// Opens the transport behind the live channel.
pub trait LiveConnector {
    type Frames: Stream<Item = Result<String>> + Unpin;

    fn connect(&self, url: &str) -> impl Future<Output = Result<Self::Frames>>;
}

/// Connector fed from an in-process channel.
///
/// Hands out its receiver on the first `connect`; later attempts fail.
pub struct ChannelConnector {
    frames: std::sync::Mutex<Option<mpsc::UnboundedReceiver<Result<String>>>>,
    urls: std::sync::Mutex<Vec<String>>,
}

impl ChannelConnector {
    pub fn new() -> (Self, mpsc::UnboundedSender<Result<String>>) {
        let (sender, receiver) = mpsc::unbounded();
        let connector = Self {
            frames: std::sync::Mutex::new(Some(receiver)),
            urls: std::sync::Mutex::new(Vec::new()),
        };
        (connector, sender)
    }

    /// URLs passed to `connect`, in order.
    pub fn connected_urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl LiveConnector for ChannelConnector {
    type Frames = mpsc::UnboundedReceiver<Result<String>>;

    async fn connect(&self, url: &str) -> Result<Self::Frames> {
        self.urls.lock().unwrap().push(url.to_string());
        self.frames
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ClientError::Live("channel already consumed".into()))
    }
}

/// Drives one live connection and applies its notifications to an [`AppState`].
pub struct LiveListener {
    url: String,
    state: Arc<watch::Sender<LiveState>>,
}

impl Clone for LiveListener {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl LiveListener {
    pub fn new(url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(LiveState::Disconnected);
        Self {
            url: url.into(),
            state: Arc::new(state),
        }
    }

    /// Listener for the configured live URL; `None` when live updates are off.
    pub fn from_config(config: &store::LiveConfig) -> Option<Self> {
        config.url.as_deref().map(Self::new)
    }

    pub fn state(&self) -> LiveState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LiveState> {
        self.state.subscribe()
    }

    /// `<url>?groupId=<group>&token=<access token>`; `groupId` is omitted without a group.
    pub fn channel_url(&self, group_id: Option<&str>, token: &str) -> Result<String> {
        let mut url = reqwest::Url::parse(&self.url)
            .map_err(|e| ClientError::Live(format!("invalid live url {}: {e}", self.url)))?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(group_id) = group_id {
                query.append_pair("groupId", group_id);
            }
            query.append_pair("token", token);
        }
        Ok(url.into())
    }

    fn set_state(&self, state: LiveState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            info!(?state, "live channel state changed");
        }
    }

    /// Connect, apply notifications until the channel closes, then go back to
    /// [`LiveState::Disconnected`]. Dropping the future mid-run also disconnects.
    pub async fn run<S, C>(&self, app: &AppState<S>, connector: &C) -> Result<()>
    where
        S: KeyValueStore,
        C: LiveConnector,
    {
        let token = app
            .session()
            .access_token()
            .ok_or(ClientError::Unauthenticated)?;
        let url = self.channel_url(app.active_group_id().as_deref(), &token)?;

        self.set_state(LiveState::Connecting);
        let _disconnect = DisconnectOnDrop(self);
        let mut frames = connector.connect(&url).await?;
        self.set_state(LiveState::Connected);

        while let Some(frame) = frames.next().await {
            match frame {
                Ok(text) => self.dispatch(app, &text).await,
                Err(e) => {
                    warn!("live channel failed: {e}");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn dispatch<S: KeyValueStore>(&self, app: &AppState<S>, frame: &str) {
        let Some(message) = LiveMessage::parse(frame) else {
            return;
        };
        let Some(invalidation) = message.invalidation() else {
            debug!(frame, "ignoring unknown live message");
            return;
        };
        match app.apply(invalidation.clone()).await {
            Ok(true) => debug!(?invalidation, "refetched after live update"),
            Ok(false) => debug!(?invalidation, "live update outside the active selection"),
            Err(e) => warn!(?invalidation, "refetch after live update failed: {e}"),
        }
    }
}

struct DisconnectOnDrop<'a>(&'a LiveListener);

impl Drop for DisconnectOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set_state(LiveState::Disconnected);
    }
}
