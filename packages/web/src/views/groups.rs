//! Groups page: the user's groups, and the notes and members of the selected one.

use dioxus::prelude::*;
use store::{NoteScope, Role};
use ui::{
    log_activity, use_activity_log, use_app, use_auth, use_collection, GroupList, LogLevel,
    MemberList,
};

use super::{report_failure, NoteBoard};

const GROUPS_STYLE: &str = r#"
.groups-layout { display: grid; grid-template-columns: 16rem 1fr; gap: 1.5rem; }
.group-form { display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1rem; }
.group-form input[type=text] { padding: 0.5rem 0.625rem; border: 1px solid #e3e2e0; border-radius: 4px; font: inherit; }
.group-panel h3 { margin-top: 1.5rem; }
"#;

#[component]
pub fn Groups() -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let mut name = use_signal(String::new);
    let mut private = use_signal(|| false);
    let mut selected = use_signal(|| {
        auth.peek()
            .app
            .as_ref()
            .and_then(|app| app.active_group_id())
    });

    let Some(app) = use_app() else {
        return rsx! {};
    };

    let create = {
        let app = app.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let app = app.clone();
            spawn(async move {
                let group_name = name().trim().to_string();
                if group_name.is_empty() {
                    return;
                }
                match app.groups().create(&group_name, private()).await {
                    Ok(_) => {
                        let mut log = log;
                        log_activity(&mut log, LogLevel::Success, &format!("Created {group_name}"));
                        name.set(String::new());
                        private.set(false);
                    }
                    Err(err) => report_failure(auth, log, "Creating the group", &err),
                }
            });
        }
    };

    let select = {
        let app = app.clone();
        move |group_id: String| {
            let app = app.clone();
            spawn(async move {
                selected.set(Some(group_id.clone()));
                if let Err(err) = app.select_group(&group_id).await {
                    report_failure(auth, log, "Opening the group", &err);
                }
            });
        }
    };

    let rename = {
        let app = app.clone();
        move |(group_id, new_name): (String, String)| {
            let app = app.clone();
            spawn(async move {
                if new_name.is_empty() {
                    return;
                }
                if let Err(err) = app.groups().rename(&group_id, &new_name).await {
                    report_failure(auth, log, "Renaming the group", &err);
                }
            });
        }
    };

    let delete = {
        let app = app.clone();
        move |group_id: String| {
            let app = app.clone();
            spawn(async move {
                match app.delete_group(&group_id).await {
                    Ok(()) => {
                        if selected().as_deref() == Some(group_id.as_str()) {
                            selected.set(None);
                        }
                        let mut log = log;
                        log_activity(&mut log, LogLevel::Info, "Group deleted");
                    }
                    Err(err) => report_failure(auth, log, "Deleting the group", &err),
                }
            });
        }
    };

    rsx! {
        style { {GROUPS_STYLE} }

        h2 { "Groups" }

        div {
            class: "groups-layout",
            div {
                form {
                    class: "group-form",
                    onsubmit: create,
                    input {
                        r#type: "text",
                        placeholder: "New group name",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                    label {
                        input {
                            r#type: "checkbox",
                            checked: private(),
                            onchange: move |evt: FormEvent| private.set(evt.checked()),
                        }
                        " Private"
                    }
                    button { r#type: "submit", disabled: name().trim().is_empty(), "Create group" }
                }

                GroupList {
                    groups: app.groups().cache().clone(),
                    selected: selected(),
                    on_select: select,
                    on_rename: rename,
                    on_delete: delete,
                }
            }

            if let Some(group_id) = selected() {
                GroupPanel { key: "{group_id}", group_id }
            } else {
                p { "Select a group to see its notes and members." }
            }
        }
    }
}

/// Notes and members of the selected group.
#[component]
fn GroupPanel(group_id: String) -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let mut member_id = use_signal(String::new);
    let mut member_role = use_signal(|| Role::Member);

    let Some(app) = use_app() else {
        return rsx! {};
    };
    let groups = use_collection(app.groups().cache());
    let Some(group) = groups().items().iter().find(|group| group.id == group_id).cloned() else {
        return rsx! { p { "This group is no longer available." } };
    };
    let Some(active) = app.active_group().filter(|active| active.id == group_id) else {
        return rsx! { p { "Loading {group.name}..." } };
    };

    let add_member = {
        let members = active.members.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let members = members.clone();
            spawn(async move {
                let user_id = member_id().trim().to_string();
                if user_id.is_empty() {
                    return;
                }
                match members.add(&user_id, member_role()).await {
                    Ok(()) => {
                        let mut log = log;
                        log_activity(&mut log, LogLevel::Success, &format!("Added {user_id}"));
                        member_id.set(String::new());
                    }
                    Err(err) => report_failure(auth, log, "Adding the member", &err),
                }
            });
        }
    };

    let remove_member = {
        let members = active.members.clone();
        move |user_id: String| {
            let members = members.clone();
            spawn(async move {
                if let Err(err) = members.remove(&user_id).await {
                    report_failure(auth, log, "Removing the member", &err);
                }
            });
        }
    };

    rsx! {
        div {
            class: "group-panel",
            h2 { "{group.name}" }

            h3 { "Notes" }
            NoteBoard { scope: NoteScope::Group(group_id.clone()) }

            h3 { "Members" }
            if group.capabilities.can_manage_members {
                form {
                    class: "group-form",
                    onsubmit: add_member,
                    input {
                        r#type: "text",
                        placeholder: "User id",
                        value: member_id(),
                        oninput: move |evt: FormEvent| member_id.set(evt.value()),
                    }
                    select {
                        onchange: move |evt: FormEvent| {
                            member_role.set(if evt.value() == "admin" { Role::Admin } else { Role::Member })
                        },
                        option { value: "member", "Member" }
                        option { value: "admin", "Admin" }
                    }
                    button { r#type: "submit", "Add member" }
                }
            }
            MemberList {
                members: active.members.cache().clone(),
                capabilities: group.capabilities.clone(),
                on_remove: remove_member,
            }
        }
    }
}
