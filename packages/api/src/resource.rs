//! # Generic resource controller
//!
//! [`Resource`] maps `list / create / update / delete` onto one collection path
//! (`/notes`, `/groups/{id}/notes`, `/groups/{id}/members`, ...). Notes, groups and
//! members are all instances of it, differing only in item type and path.
//!
//! Every successful mutation is followed by a full [`list`](Resource::list) so the
//! cache reflects the backend, trading a round trip for not having merge logic.
//! Mutation errors are returned unchanged; a failing `list` also records the failure
//! in the cache so views can show an error state.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::KeyValueStore;
use tracing::warn;

use crate::cache::Collection;
use crate::client::{Access, ApiClient};
use crate::error::Result;
use crate::routes;

/// Controller for one collection endpoint.
pub struct Resource<T, S: KeyValueStore> {
    client: ApiClient<S>,
    path: String,
    cache: Collection<T>,
}

impl<T, S: KeyValueStore> Clone for Resource<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<T, S> Resource<T, S>
where
    T: DeserializeOwned + Clone,
    S: KeyValueStore,
{
    pub fn new(client: ApiClient<S>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            cache: Collection::new(),
        }
    }

    pub fn client(&self) -> &ApiClient<S> {
        &self.client
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cache(&self) -> &Collection<T> {
        &self.cache
    }

    /// Fetch the collection and replace the cache with it.
    pub async fn list(&self) -> Result<Vec<T>> {
        match self.client.get_list::<T>(&self.path).await {
            Ok(items) => {
                self.cache.replace(items.clone());
                Ok(items)
            }
            Err(err) => {
                warn!(path = %self.path, "list failed: {err}");
                self.cache.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// `POST` a new item, then re-list. Returns the created item's body, if any.
    pub async fn create<B>(&self, fields: &B) -> Result<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        let created = self
            .client
            .request(Method::POST, &self.path, Some(fields), Access::Authenticated)
            .await?;
        self.resync().await;
        Ok(created)
    }

    /// `PUT` new fields for an item, then re-list.
    pub async fn update<B>(&self, id: &str, fields: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.client
            .request(
                Method::PUT,
                &routes::item(&self.path, id),
                Some(fields),
                Access::Authenticated,
            )
            .await?;
        self.resync().await;
        Ok(())
    }

    /// `DELETE` an item, then re-list.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .request(
                Method::DELETE,
                &routes::item(&self.path, id),
                None::<&()>,
                Access::Authenticated,
            )
            .await?;
        self.resync().await;
        Ok(())
    }

    // The mutation already succeeded; a failed re-list only degrades the cache.
    async fn resync(&self) {
        let _ = self.list().await;
    }
}
