//! Personal and group notes.

use serde_json::Value;
use store::{KeyValueStore, Note, NoteDraft, NoteScope};

use crate::cache::Collection;
use crate::client::ApiClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::routes::Routes;

/// Notes controller for one scope: `/notes` or `/groups/{id}/notes`.
pub struct Notes<S: KeyValueStore> {
    scope: NoteScope,
    resource: Resource<Note, S>,
}

impl<S: KeyValueStore> Clone for Notes<S> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            resource: self.resource.clone(),
        }
    }
}

impl<S: KeyValueStore> Notes<S> {
    pub fn new(client: ApiClient<S>, routes: &Routes, scope: NoteScope) -> Self {
        let path = routes.notes(&scope);
        Self {
            scope,
            resource: Resource::new(client, path),
        }
    }

    pub fn scope(&self) -> &NoteScope {
        &self.scope
    }

    pub fn cache(&self) -> &Collection<Note> {
        self.resource.cache()
    }

    pub async fn list(&self) -> Result<Vec<Note>> {
        self.resource.list().await
    }

    pub async fn create(&self, draft: &NoteDraft) -> Result<Option<Value>> {
        self.resource.create(draft).await
    }

    pub async fn update(&self, note_id: &str, draft: &NoteDraft) -> Result<()> {
        self.resource.update(note_id, draft).await
    }

    pub async fn delete(&self, note_id: &str) -> Result<()> {
        self.resource.delete(note_id).await
    }
}
