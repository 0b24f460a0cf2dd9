//! # Application state
//!
//! [`AppState`] is the one owned object holding everything the client knows: the
//! request client (and through it the session), the personal notes, the group list
//! and the currently selected group. It is created at app start and
//! [`reset`](AppState::reset) on logout or when the session expires.
//!
//! Live updates land here through [`AppState::apply`], which refetches the affected
//! collection. Group-scoped invalidations only refetch when that group is the
//! active selection.

use std::sync::{Arc, Mutex};

use futures::join;
use store::{ClientConfig, KeyValueStore, NoteScope, Session, SessionStore};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::Result;
use crate::groups::{Groups, Members};
use crate::live::Invalidation;
use crate::notes::Notes;
use crate::routes::Routes;

/// Notes and members of the selected group.
pub struct ActiveGroup<S: KeyValueStore> {
    pub id: String,
    pub notes: Notes<S>,
    pub members: Members<S>,
}

impl<S: KeyValueStore> Clone for ActiveGroup<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            notes: self.notes.clone(),
            members: self.members.clone(),
        }
    }
}

/// Owned session and cache state of the client. Cheap to clone.
pub struct AppState<S: KeyValueStore> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: KeyValueStore> {
    client: ApiClient<S>,
    routes: Routes,
    personal: Notes<S>,
    groups: Groups<S>,
    active: Mutex<Option<ActiveGroup<S>>>,
    active_id: watch::Sender<Option<String>>,
}

impl<S: KeyValueStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(client: ApiClient<S>, routes: Routes) -> Self {
        let personal = Notes::new(client.clone(), &routes, NoteScope::Personal);
        let groups = Groups::new(client.clone(), &routes);
        let (active_id, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                client,
                routes,
                personal,
                groups,
                active: Mutex::new(None),
                active_id,
            }),
        }
    }

    /// Open the persisted session from `store` and build the state for `config`.
    pub async fn open(config: &ClientConfig, store: S) -> Self {
        let session = SessionStore::open(store).await;
        let client = ApiClient::from_config(&config.api, session);
        Self::new(client, Routes::new(config.api.group_segment))
    }

    pub fn client(&self) -> &ApiClient<S> {
        &self.inner.client
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.inner.client.session()
    }

    pub fn routes(&self) -> &Routes {
        &self.inner.routes
    }

    pub fn personal_notes(&self) -> &Notes<S> {
        &self.inner.personal
    }

    pub fn groups(&self) -> &Groups<S> {
        &self.inner.groups
    }

    pub fn active_group(&self) -> Option<ActiveGroup<S>> {
        self.inner.active.lock().unwrap().clone()
    }

    pub fn active_group_id(&self) -> Option<String> {
        self.inner.active_id.borrow().clone()
    }

    /// Receiver notified whenever the selected group changes.
    pub fn subscribe_active(&self) -> watch::Receiver<Option<String>> {
        self.inner.active_id.subscribe()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().is_signed_in()
    }

    /// Sign in, then load the user's notes and groups.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.client().login(email, password).await?;
        self.reset();
        if let Err(e) = self.load().await {
            debug!("initial load after login failed: {e}");
        }
        Ok(session)
    }

    /// Resume a persisted session. Returns whether the user is still signed in.
    pub async fn restore(&self) -> bool {
        if !self.is_signed_in() {
            return false;
        }
        match self.load().await {
            Ok(()) => true,
            Err(e) if e.requires_login() => {
                info!("persisted session is no longer valid");
                self.client().logout().await;
                self.reset();
                false
            }
            Err(_) => true,
        }
    }

    /// Fetch personal notes and groups side by side.
    pub async fn load(&self) -> Result<()> {
        let (notes, groups) = join!(self.personal_notes().list(), self.groups().list());
        let result = notes.and(groups).map(|_| ());
        self.settle(result)
    }

    /// Make `group_id` the active group and fetch its notes and members.
    pub async fn select_group(&self, group_id: &str) -> Result<ActiveGroup<S>> {
        let client = self.client().clone();
        let routes = self.routes();
        let group = ActiveGroup {
            id: group_id.to_string(),
            notes: Notes::new(
                client.clone(),
                routes,
                NoteScope::Group(group_id.to_string()),
            ),
            members: Members::new(client, routes, group_id),
        };

        *self.inner.active.lock().unwrap() = Some(group.clone());
        self.inner.active_id.send_replace(Some(group_id.to_string()));

        let (notes, members) = join!(group.notes.list(), group.members.list());
        self.settle(notes.and(members).map(|_| ()))?;
        Ok(group)
    }

    pub fn clear_selection(&self) {
        self.inner.active.lock().unwrap().take();
        self.inner.active_id.send_replace(None);
    }

    /// Delete a group, dropping the selection if it was the active one.
    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        let result = self.groups().delete(group_id).await;
        self.settle(result)?;
        if self.active_group_id().as_deref() == Some(group_id) {
            self.clear_selection();
        }
        Ok(())
    }

    /// Sign out and forget every cached collection.
    pub async fn logout(&self) {
        self.client().logout().await;
        self.reset();
    }

    /// Forget cached collections and the selection.
    pub fn reset(&self) {
        self.personal_notes().cache().reset();
        self.groups().cache().reset();
        self.clear_selection();
    }

    /// Refetch whatever `invalidation` names. Returns whether anything was fetched.
    pub async fn apply(&self, invalidation: Invalidation) -> Result<bool> {
        let result = match invalidation {
            Invalidation::PersonalNotes => self.personal_notes().list().await.map(|_| true),
            Invalidation::Groups => self.groups().list().await.map(|_| true),
            Invalidation::GroupNotes(group_id) => match self.active_in(&group_id) {
                Some(group) => group.notes.list().await.map(|_| true),
                None => Ok(false),
            },
            Invalidation::GroupMembers(group_id) => match self.active_in(&group_id) {
                Some(group) => group.members.list().await.map(|_| true),
                None => Ok(false),
            },
        };
        self.settle(result)
    }

    fn active_in(&self, group_id: &str) -> Option<ActiveGroup<S>> {
        self.active_group().filter(|group| group.id == group_id)
    }

    // The client already cleared the session; drop the caches that belonged to it.
    fn settle<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.requires_login() {
                self.reset();
            }
        }
        result
    }
}
