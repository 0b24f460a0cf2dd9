//! Endpoint paths, relative to the configured API root.

use store::{GroupSegment, NoteScope};

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const LOGOUT: &str = "/logout";
pub const TOKEN_REFRESH: &str = "/token/refresh";
pub const ACCOUNT: &str = "/user/me";

/// Builds resource paths for the configured group segment (`/groups` or `/teams`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Routes {
    segment: GroupSegment,
}

impl Routes {
    pub fn new(segment: GroupSegment) -> Self {
        Self { segment }
    }

    pub fn segment(&self) -> GroupSegment {
        self.segment
    }

    pub fn groups(&self) -> String {
        format!("/{}", self.segment.as_str())
    }

    pub fn group(&self, group_id: &str) -> String {
        format!("/{}/{group_id}", self.segment.as_str())
    }

    pub fn notes(&self, scope: &NoteScope) -> String {
        match scope {
            NoteScope::Personal => "/notes".to_string(),
            NoteScope::Group(group_id) => format!("{}/notes", self.group(group_id)),
        }
    }

    pub fn members(&self, group_id: &str) -> String {
        format!("{}/members", self.group(group_id))
    }
}

/// Join a collection path and an item id.
pub fn item(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_paths() {
        let routes = Routes::default();
        assert_eq!(routes.groups(), "/groups");
        assert_eq!(routes.group("g1"), "/groups/g1");
        assert_eq!(routes.notes(&NoteScope::Personal), "/notes");
        assert_eq!(
            routes.notes(&NoteScope::Group("g1".into())),
            "/groups/g1/notes"
        );
        assert_eq!(routes.members("g1"), "/groups/g1/members");
        assert_eq!(item(&routes.members("g1"), "u2"), "/groups/g1/members/u2");
    }

    #[test]
    fn test_team_paths() {
        let routes = Routes::new(GroupSegment::Teams);
        assert_eq!(routes.groups(), "/teams");
        assert_eq!(
            routes.notes(&NoteScope::Group("t9".into())),
            "/teams/t9/notes"
        );
    }
}
