//! # Domain models for notes, groups and memberships
//!
//! These are the JSON shapes exchanged with the notes backend. Two naming families
//! exist on the wire (the "groups" API and the older "teams" API), so fields accept
//! both spellings through serde aliases:
//!
//! | Model | Identity | Accepted aliases |
//! |-------|----------|------------------|
//! | [`Note`] | `id` | `note_id`; body as `body`, `content` or `note_body`; owner group as `group_id` or `team_id` |
//! | [`Group`] | `id` | `team_id`; name as `name` or `team_name` |
//! | [`Membership`] | `user_id` | group as `group_id` or `team_id` |
//!
//! Request payloads ([`NoteDraft`], [`GroupDraft`], [`GroupRename`], [`NewMember`],
//! [`Credentials`], [`AccountUpdate`]) only serialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "has_notes_premium", alias = "hasPremium")]
    pub has_premium: bool,
}

/// Who owns a note: the signed-in user, or a group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoteScope {
    Personal,
    Group(String),
}

impl NoteScope {
    pub fn group_id(&self) -> Option<&str> {
        match self {
            NoteScope::Personal => None,
            NoteScope::Group(id) => Some(id),
        }
    }
}

/// A personal or group note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(alias = "note_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "content", alias = "note_body")]
    pub body: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, alias = "team_id")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    pub fn scope(&self) -> NoteScope {
        match &self.group_id {
            Some(id) => NoteScope::Group(id.clone()),
            None => NoteScope::Personal,
        }
    }

    /// Title for display, falling back to the first line of the body.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => self.body.lines().next().unwrap_or("").trim(),
        }
    }
}

/// Operations the backend allows the current user on a group.
///
/// The backend is the authority; an absent flag means "not allowed" and the UI
/// hides the matching control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCapabilities {
    #[serde(default)]
    pub can_rename: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_manage_members: bool,
}

/// A shared notes group (a "team" on the older API).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(alias = "team_id")]
    pub id: String,
    #[serde(alias = "team_name")]
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub members: Vec<Membership>,
    #[serde(default)]
    pub capabilities: GroupCapabilities,
}

/// Capability a member holds inside a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
    Owner,
    #[serde(other)]
    Other,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Other => "other",
        }
    }
}

/// A user's membership in a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(default, alias = "team_id")]
    pub group_id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub role: Role,
}

/// Body of `POST /login` and `POST /register`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `PUT /user/me`.
#[derive(Clone, Debug, Serialize)]
pub struct AccountUpdate<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Fields for creating or updating a note.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NoteDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
}

impl NoteDraft {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Fields for creating a group. The teams backend names the field `team_name`
/// and records the creator from the body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupDraft {
    Group {
        name: String,
        is_private: bool,
    },
    Team {
        team_name: String,
        user_id: String,
        is_private: bool,
    },
}

impl GroupDraft {
    pub fn name(&self) -> &str {
        match self {
            GroupDraft::Group { name, .. } => name,
            GroupDraft::Team { team_name, .. } => team_name,
        }
    }
}

/// Body of a group rename.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupRename {
    pub name: String,
}

/// Body of an add-member call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMember {
    pub user_id: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_accepts_both_wire_spellings() {
        let groups_api: Note = serde_json::from_value(json!({
            "id": "n1",
            "title": "Plan",
            "content": "Ship it",
            "group_id": "g1",
        }))
        .unwrap();
        assert_eq!(groups_api.body, "Ship it");
        assert_eq!(groups_api.scope(), NoteScope::Group("g1".into()));

        let teams_api: Note = serde_json::from_value(json!({
            "note_id": "n2",
            "body": "Hello",
            "user_id": "u1",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:05:00.123456Z",
        }))
        .unwrap();
        assert_eq!(teams_api.id, "n2");
        assert_eq!(teams_api.scope(), NoteScope::Personal);
        assert!(teams_api.updated_at.unwrap() > teams_api.created_at.unwrap());
    }

    #[test]
    fn test_display_title_falls_back_to_first_line() {
        let note = Note {
            id: "n1".into(),
            title: None,
            body: "  Groceries \nmilk\neggs".into(),
            user_id: None,
            group_id: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(note.display_title(), "Groceries");
    }

    #[test]
    fn test_group_without_capabilities_allows_nothing() {
        let group: Group = serde_json::from_value(json!({
            "team_id": "g1",
            "team_name": "Ops",
        }))
        .unwrap();
        assert_eq!(group.name, "Ops");
        assert_eq!(group.capabilities, GroupCapabilities::default());
        assert!(!group.capabilities.can_rename);
    }

    #[test]
    fn test_unknown_role_is_other() {
        let member: Membership =
            serde_json::from_value(json!({ "user_id": "u2", "role": "editor" })).unwrap();
        assert_eq!(member.role, Role::Other);

        let admin: Membership =
            serde_json::from_value(json!({ "user_id": "u3", "role": "admin" })).unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_note_draft_omits_missing_title() {
        let body = serde_json::to_value(NoteDraft::new("text")).unwrap();
        assert_eq!(body, json!({ "body": "text" }));

        let titled = serde_json::to_value(NoteDraft::new("text").with_title("T")).unwrap();
        assert_eq!(titled, json!({ "title": "T", "body": "text" }));
    }

    #[test]
    fn test_team_draft_names_the_team_and_creator() {
        let team = GroupDraft::Team {
            team_name: "Writers".into(),
            user_id: "u1".into(),
            is_private: false,
        };
        assert_eq!(team.name(), "Writers");
        assert_eq!(
            serde_json::to_value(&team).unwrap(),
            json!({ "team_name": "Writers", "user_id": "u1", "is_private": false })
        );

        let group = GroupDraft::Group {
            name: "Book club".into(),
            is_private: true,
        };
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({ "name": "Book club", "is_private": true })
        );
    }
}
