//! Groups and their memberships.

use serde_json::Value;
use store::{
    Group, GroupDraft, GroupRename, GroupSegment, KeyValueStore, Membership, NewMember, Role,
};

use crate::cache::Collection;
use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use crate::resource::Resource;
use crate::routes::Routes;

/// Controller for the groups the signed-in user belongs to.
pub struct Groups<S: KeyValueStore> {
    resource: Resource<Group, S>,
    segment: GroupSegment,
}

impl<S: KeyValueStore> Clone for Groups<S> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            segment: self.segment,
        }
    }
}

impl<S: KeyValueStore> Groups<S> {
    pub fn new(client: ApiClient<S>, routes: &Routes) -> Self {
        Self {
            resource: Resource::new(client, routes.groups()),
            segment: routes.segment(),
        }
    }

    pub fn cache(&self) -> &Collection<Group> {
        self.resource.cache()
    }

    /// Cached group by id.
    pub fn get(&self, group_id: &str) -> Option<Group> {
        self.cache().items().into_iter().find(|g| g.id == group_id)
    }

    pub async fn list(&self) -> Result<Vec<Group>> {
        self.resource.list().await
    }

    pub async fn create(&self, name: &str, is_private: bool) -> Result<Option<Value>> {
        let draft = match self.segment {
            GroupSegment::Groups => GroupDraft::Group {
                name: name.to_string(),
                is_private,
            },
            GroupSegment::Teams => GroupDraft::Team {
                team_name: name.to_string(),
                user_id: self
                    .resource
                    .client()
                    .session()
                    .get()
                    .map(|session| session.user_id)
                    .ok_or(ClientError::Unauthenticated)?,
                is_private,
            },
        };
        self.resource.create(&draft).await
    }

    pub async fn rename(&self, group_id: &str, name: &str) -> Result<()> {
        let rename = GroupRename {
            name: name.to_string(),
        };
        self.resource.update(group_id, &rename).await
    }

    pub async fn delete(&self, group_id: &str) -> Result<()> {
        self.resource.delete(group_id).await
    }
}

/// Controller for one group's member list.
pub struct Members<S: KeyValueStore> {
    group_id: String,
    resource: Resource<Membership, S>,
}

impl<S: KeyValueStore> Clone for Members<S> {
    fn clone(&self) -> Self {
        Self {
            group_id: self.group_id.clone(),
            resource: self.resource.clone(),
        }
    }
}

impl<S: KeyValueStore> Members<S> {
    pub fn new(client: ApiClient<S>, routes: &Routes, group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            resource: Resource::new(client, routes.members(group_id)),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn cache(&self) -> &Collection<Membership> {
        self.resource.cache()
    }

    pub async fn list(&self) -> Result<Vec<Membership>> {
        self.resource.list().await
    }

    pub async fn add(&self, user_id: &str, role: Role) -> Result<()> {
        let member = NewMember {
            user_id: user_id.to_string(),
            role,
        };
        self.resource.create(&member).await.map(|_| ())
    }

    pub async fn remove(&self, user_id: &str) -> Result<()> {
        self.resource.delete(user_id).await
    }
}
