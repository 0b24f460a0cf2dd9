//! # Session Store
//!
//! Holds the signed-in session (access token, refresh token, current user) and
//! persists it through a [`KeyValueStore`] so a reload keeps the user signed in.
//!
//! The in-memory copy is authoritative while the app runs: [`SessionStore::get`] is
//! synchronous and every [`set`](SessionStore::set) / [`clear`](SessionStore::clear)
//! updates memory first, then writes through to durable storage.
//!
//! No expiry is tracked here. An expired access token is discovered when the backend
//! answers `401`, and the request client runs the refresh protocol.
//!
//! ## Storage keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`ACCESS_TOKEN_KEY`] | bearer access token |
//! | [`REFRESH_TOKEN_KEY`] | refresh token |
//! | [`USER_ID_KEY`] | current user id |
//! | [`USER_EMAIL_KEY`] | current user email (optional) |
//!
//! A persisted state missing either token or the user id is treated as no session,
//! and the leftover keys are removed.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::kv::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_ID_KEY: &str = "userId";
pub const USER_EMAIL_KEY: &str = "userEmail";

const ALL_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY, USER_EMAIL_KEY];

/// Credentials and identity of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub user_email: Option<String>,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            user_id: user_id.into(),
            user_email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// Replace the access token, and the refresh token when the backend rotated it.
    pub fn with_tokens(mut self, access_token: String, refresh_token: Option<String>) -> Self {
        self.access_token = access_token;
        if let Some(refresh_token) = refresh_token {
            self.refresh_token = refresh_token;
        }
        self
    }
}

/// Persistent holder of the current [`Session`].
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    current: Mutex<Option<Session>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Open the store and load any session persisted by a previous run.
    pub async fn open(store: S) -> Self {
        let current = Self::load(&store).await;
        Self {
            store,
            current: Mutex::new(current),
        }
    }

    async fn load(store: &S) -> Option<Session> {
        let access_token = store.get(ACCESS_TOKEN_KEY).await;
        let refresh_token = store.get(REFRESH_TOKEN_KEY).await;
        let user_id = store.get(USER_ID_KEY).await;

        match (access_token, refresh_token, user_id) {
            (Some(access_token), Some(refresh_token), Some(user_id)) => Some(Session {
                access_token,
                refresh_token,
                user_id,
                user_email: store.get(USER_EMAIL_KEY).await,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("discarding incomplete persisted session");
                for key in ALL_KEYS {
                    store.remove(key).await;
                }
                None
            }
        }
    }

    /// Current session, or `None` when signed out.
    pub fn get(&self) -> Option<Session> {
        self.current.lock().unwrap().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.get().map(|s| s.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get().map(|s| s.refresh_token)
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }

    /// Replace the session and persist it.
    pub async fn set(&self, session: Session) {
        *self.current.lock().unwrap() = Some(session.clone());
        self.persist(&session).await;
    }

    /// Swap in refreshed tokens if the session that sent `sent_refresh_token` is
    /// still current. Returns `false`, changing nothing, when the session was
    /// cleared or replaced in the meantime.
    pub async fn replace_tokens(
        &self,
        sent_refresh_token: &str,
        access_token: String,
        refresh_token: Option<String>,
    ) -> bool {
        let updated = {
            let mut current = self.current.lock().unwrap();
            match current.take() {
                Some(session) if session.refresh_token == sent_refresh_token => {
                    let updated = session.with_tokens(access_token, refresh_token);
                    *current = Some(updated.clone());
                    updated
                }
                other => {
                    *current = other;
                    return false;
                }
            }
        };
        self.persist(&updated).await;
        true
    }

    async fn persist(&self, session: &Session) {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token).await;
        self.store.set(REFRESH_TOKEN_KEY, &session.refresh_token).await;
        self.store.set(USER_ID_KEY, &session.user_id).await;
        match &session.user_email {
            Some(email) => self.store.set(USER_EMAIL_KEY, email).await,
            None => self.store.remove(USER_EMAIL_KEY).await,
        }
    }

    /// Drop the session from memory and durable storage.
    pub async fn clear(&self) {
        self.current.lock().unwrap().take();
        for key in ALL_KEYS {
            self.store.remove(key).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_empty_store_has_no_session() {
        let sessions = SessionStore::open(MemoryStore::new()).await;
        assert!(sessions.get().is_none());
        assert!(sessions.access_token().is_none());
        assert!(!sessions.is_signed_in());
    }

    #[tokio::test]
    async fn test_set_then_reopen() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::open(kv.clone()).await;
        let session = Session::new("a1", "r1", "u1").with_email("ada@example.com");

        sessions.set(session.clone()).await;
        assert_eq!(sessions.get(), Some(session.clone()));

        // Simulates a browser reload.
        let reopened = SessionStore::open(kv.clone()).await;
        assert_eq!(reopened.get(), Some(session));
        assert_eq!(kv.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn test_clear_removes_every_key() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::open(kv.clone()).await;
        sessions
            .set(Session::new("a1", "r1", "u1").with_email("ada@example.com"))
            .await;

        sessions.clear().await;

        assert!(sessions.get().is_none());
        assert!(kv.is_empty());
        assert!(SessionStore::open(kv).await.get().is_none());
    }

    #[tokio::test]
    async fn test_half_persisted_session_is_discarded() {
        let kv = MemoryStore::new();
        kv.set(ACCESS_TOKEN_KEY, "a1").await;
        kv.set(USER_ID_KEY, "u1").await;

        let sessions = SessionStore::open(kv.clone()).await;

        assert!(sessions.get().is_none());
        assert!(kv.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_unless_rotated() {
        let session = Session::new("a1", "r1", "u1");

        let refreshed = session.clone().with_tokens("a2".into(), None);
        assert_eq!(refreshed.access_token, "a2");
        assert_eq!(refreshed.refresh_token, "r1");

        let rotated = session.with_tokens("a3".into(), Some("r2".into()));
        assert_eq!(rotated.refresh_token, "r2");
    }

    #[tokio::test]
    async fn test_replace_tokens_only_touches_the_sending_session() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::open(kv.clone()).await;
        sessions.set(Session::new("a1", "r1", "u1")).await;

        assert!(sessions.replace_tokens("r1", "a2".into(), Some("r2".into())).await);
        assert_eq!(kv.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("a2"));
        assert_eq!(sessions.refresh_token().as_deref(), Some("r2"));

        // A refresh answered with the old token no longer applies.
        assert!(!sessions.replace_tokens("r1", "a3".into(), None).await);
        assert_eq!(sessions.access_token().as_deref(), Some("a2"));

        sessions.clear().await;
        assert!(!sessions.replace_tokens("r2", "a4".into(), None).await);
        assert!(sessions.get().is_none());
        assert!(kv.is_empty());
    }

    #[tokio::test]
    async fn test_set_without_email_drops_stale_email() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::open(kv.clone()).await;
        sessions
            .set(Session::new("a1", "r1", "u1").with_email("old@example.com"))
            .await;
        sessions.set(Session::new("a2", "r2", "u2")).await;

        assert!(kv.get(USER_EMAIL_KEY).await.is_none());
        assert_eq!(SessionStore::open(kv).await.get().unwrap().user_id, "u2");
    }
}
