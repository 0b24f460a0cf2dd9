//! # Observable collection cache
//!
//! Each resource controller keeps the last fetched collection in a [`Collection`].
//! The cache is a best-effort snapshot: it is replaced wholesale after every fetch
//! and never patched in place, so any staleness lasts only until the next fetch.
//!
//! Views subscribe through [`Collection::subscribe`] and redraw whenever the
//! snapshot changes. The channel is a `tokio::sync::watch`, so a slow view only ever
//! sees the latest state.

use std::sync::Arc;

use tokio::sync::watch;

/// Last known state of a collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CollectionState<T> {
    /// Never fetched, or reset after logout.
    #[default]
    Idle,
    Loaded(Vec<T>),
    /// The last fetch failed; the message is for display.
    Failed(String),
}

impl<T> CollectionState<T> {
    /// Items of a loaded collection; empty otherwise.
    pub fn items(&self) -> &[T] {
        match self {
            CollectionState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CollectionState::Loaded(_))
    }
}

/// Shared, observable snapshot of one resource collection.
pub struct Collection<T> {
    sender: Arc<watch::Sender<CollectionState<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

/// Two handles are equal when they observe the same collection.
impl<T> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sender, &other.sender)
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(CollectionState::Idle);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn snapshot(&self) -> CollectionState<T> {
        self.sender.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.sender.borrow().items().to_vec()
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.sender.subscribe()
    }

    pub(crate) fn replace(&self, items: Vec<T>) {
        self.sender.send_replace(CollectionState::Loaded(items));
    }

    pub(crate) fn fail(&self, message: String) {
        self.sender.send_replace(CollectionState::Failed(message));
    }

    pub fn reset(&self) {
        self.sender.send_replace(CollectionState::Idle);
    }
}
