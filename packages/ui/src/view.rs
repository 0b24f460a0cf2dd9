//! # View models
//!
//! Pure functions from cache snapshots to what the list components draw. Nothing
//! here touches the network or the DOM, so every rule about what is shown (empty
//! states, previews, which controls appear) is decided and tested in one place.
//!
//! | Input | Output | Controls |
//! |-------|--------|----------|
//! | `CollectionState<Note>` | [`NoteRow`]s | edit and delete on every note |
//! | `CollectionState<Group>` | [`GroupRow`]s | rename / delete / manage members from [`GroupCapabilities`] |
//! | `CollectionState<Membership>` + capabilities | [`MemberRow`]s | remove only with `can_manage_members` |

use api::CollectionState;
use store::{Group, GroupCapabilities, Membership, Note};

/// Characters of body text shown before a note preview is cut.
pub const PREVIEW_CHARS: usize = 100;

/// What a list component should draw.
#[derive(Clone, Debug, PartialEq)]
pub enum ListView<R> {
    Loading,
    Empty(&'static str),
    Failed(String),
    Rows(Vec<R>),
}

impl<R> ListView<R> {
    fn from_state<T>(
        state: &CollectionState<T>,
        empty: &'static str,
        row: impl Fn(&T) -> R,
    ) -> Self {
        match state {
            CollectionState::Idle => ListView::Loading,
            CollectionState::Failed(message) => ListView::Failed(message.clone()),
            CollectionState::Loaded(items) if items.is_empty() => ListView::Empty(empty),
            CollectionState::Loaded(items) => ListView::Rows(items.iter().map(row).collect()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoteRow {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub updated: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupRow {
    pub id: String,
    pub name: String,
    pub is_private: bool,
    pub member_count: usize,
    pub controls: GroupControls,
}

/// Group actions the current user may invoke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupControls {
    pub rename: bool,
    pub delete: bool,
    pub manage_members: bool,
}

impl From<&GroupCapabilities> for GroupControls {
    fn from(capabilities: &GroupCapabilities) -> Self {
        Self {
            rename: capabilities.can_rename,
            delete: capabilities.can_delete,
            manage_members: capabilities.can_manage_members,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberRow {
    pub user_id: String,
    pub role: &'static str,
    pub removable: bool,
}

/// Body text cut to [`PREVIEW_CHARS`] characters, with `...` when cut.
pub fn preview(body: &str) -> String {
    let mut chars = body.char_indices();
    match chars.nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

pub fn note_rows(state: &CollectionState<Note>) -> ListView<NoteRow> {
    ListView::from_state(state, "No notes yet.", |note| NoteRow {
        id: note.id.clone(),
        title: note.display_title().to_string(),
        preview: preview(&note.body),
        updated: note
            .updated_at
            .or(note.created_at)
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string()),
    })
}

pub fn group_rows(state: &CollectionState<Group>) -> ListView<GroupRow> {
    ListView::from_state(state, "You are not in any group.", |group| GroupRow {
        id: group.id.clone(),
        name: group.name.clone(),
        is_private: group.is_private,
        member_count: group.members.len(),
        controls: GroupControls::from(&group.capabilities),
    })
}

/// Member rows for a group; removal is offered only when the group allows it.
pub fn member_rows(
    state: &CollectionState<Membership>,
    capabilities: &GroupCapabilities,
) -> ListView<MemberRow> {
    ListView::from_state(state, "No members.", |member| MemberRow {
        user_id: member.user_id.clone(),
        role: member.role.label(),
        removable: capabilities.can_manage_members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use store::{Membership, Role};

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            title: None,
            body: body.to_string(),
            user_id: None,
            group_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn group(id: &str, capabilities: GroupCapabilities) -> Group {
        Group {
            id: id.to_string(),
            name: format!("Group {id}"),
            is_private: false,
            members: vec![],
            capabilities,
        }
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short"), "short");
        let exact = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);

        let long = "é".repeat(PREVIEW_CHARS + 5);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_list_states() {
        assert_eq!(note_rows(&CollectionState::Idle), ListView::Loading);
        assert_eq!(
            note_rows(&CollectionState::Loaded(vec![])),
            ListView::Empty("No notes yet.")
        );
        assert_eq!(
            group_rows(&CollectionState::Failed("offline".into())),
            ListView::Failed("offline".into())
        );
    }

    #[test]
    fn test_note_rows() {
        let mut dated = note("n2", "Shopping\nmilk, eggs");
        dated.updated_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());

        let ListView::Rows(rows) = note_rows(&CollectionState::Loaded(vec![
            note("n1", "hello"),
            dated,
        ])) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].title, "hello");
        assert_eq!(rows[0].updated, None);
        assert_eq!(rows[1].title, "Shopping");
        assert_eq!(rows[1].updated.as_deref(), Some("2024-03-01 09:30"));
    }

    #[test]
    fn test_group_controls_follow_capabilities() {
        let owner = GroupCapabilities {
            can_rename: true,
            can_delete: true,
            can_manage_members: true,
        };
        let ListView::Rows(rows) = group_rows(&CollectionState::Loaded(vec![
            group("g1", owner),
            group("g2", GroupCapabilities::default()),
        ])) else {
            panic!("expected rows");
        };
        assert_eq!(
            rows[0].controls,
            GroupControls {
                rename: true,
                delete: true,
                manage_members: true
            }
        );
        assert_eq!(rows[1].controls, GroupControls::default());
    }

    #[test]
    fn test_member_rows() {
        let members = CollectionState::Loaded(vec![Membership {
            group_id: Some("g1".into()),
            user_id: "u2".into(),
            role: Role::Admin,
        }]);

        let ListView::Rows(rows) = member_rows(&members, &GroupCapabilities::default()) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].role, "admin");
        assert!(!rows[0].removable);

        let manager = GroupCapabilities {
            can_manage_members: true,
            ..Default::default()
        };
        let ListView::Rows(rows) = member_rows(&members, &manager) else {
            panic!("expected rows");
        };
        assert!(rows[0].removable);
    }
}
