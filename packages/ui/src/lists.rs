//! List components for notes, groups and members.
//!
//! Each component subscribes to one [`Collection`] and draws the matching
//! [`ListView`](crate::view::ListView). Actions are reported through event handlers;
//! the caller runs them against the controller, and the redraw follows from the
//! refetch that every mutation ends with.

use api::Collection;
use dioxus::prelude::*;
use store::{Group, GroupCapabilities, Membership, Note};

use crate::hooks::use_collection;
use crate::view::{group_rows, member_rows, note_rows, ListView};

const LIST_STYLE: &str = r#"
.entity-list { list-style: none; margin: 0; padding: 0; }
.entity-row { display: flex; align-items: center; gap: 0.5rem; padding: 0.5rem 0.75rem; border-bottom: 1px solid #ececea; }
.entity-row--selected { background: #f1f1ef; }
.entity-main { flex: 1; min-width: 0; cursor: pointer; }
.entity-title { font-weight: 600; color: #37352f; }
.entity-meta { font-size: 0.8125rem; color: #787774; overflow: hidden; text-overflow: ellipsis; }
.entity-actions button { font-size: 0.8125rem; }
.list-status { padding: 0.75rem; color: #787774; }
.list-status--error { color: #d44c47; }
"#;

/// Placeholder rows shared by every list.
fn status<R>(view: &ListView<R>) -> Option<Element> {
    match view {
        ListView::Loading => Some(rsx! { p { class: "list-status", "Loading..." } }),
        ListView::Empty(message) => Some(rsx! { p { class: "list-status", "{message}" } }),
        ListView::Failed(message) => Some(rsx! {
            p { class: "list-status list-status--error", "{message}" }
        }),
        ListView::Rows(_) => None,
    }
}

#[component]
pub fn NoteList(
    notes: Collection<Note>,
    on_edit: EventHandler<Note>,
    on_delete: EventHandler<String>,
) -> Element {
    let state = use_collection(&notes);
    let snapshot = state();
    let view = note_rows(&snapshot);
    if let Some(placeholder) = status(&view) {
        return placeholder;
    }
    let ListView::Rows(rows) = view else {
        return rsx! {};
    };

    rsx! {
        style { {LIST_STYLE} }
        ul {
            class: "entity-list",
            for (row, note) in rows.into_iter().zip(snapshot.items().to_vec()) {
                li {
                    key: "{row.id}",
                    class: "entity-row",
                    div {
                        class: "entity-main",
                        onclick: move |_| on_edit.call(note.clone()),
                        div { class: "entity-title", "{row.title}" }
                        div { class: "entity-meta", "{row.preview}" }
                        if let Some(updated) = row.updated.clone() {
                            div { class: "entity-meta", "Updated {updated}" }
                        }
                    }
                    div {
                        class: "entity-actions",
                        button {
                            onclick: {
                                let id = row.id.clone();
                                move |_| on_delete.call(id.clone())
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn GroupList(
    groups: Collection<Group>,
    selected: Option<String>,
    on_select: EventHandler<String>,
    on_rename: EventHandler<(String, String)>,
    on_delete: EventHandler<String>,
) -> Element {
    let state = use_collection(&groups);
    let mut renaming = use_signal(|| Option::<(String, String)>::None);
    let view = group_rows(&state());
    if let Some(placeholder) = status(&view) {
        return placeholder;
    }
    let ListView::Rows(rows) = view else {
        return rsx! {};
    };

    rsx! {
        style { {LIST_STYLE} }
        ul {
            class: "entity-list",
            for row in rows {
                li {
                    key: "{row.id}",
                    class: if selected.as_deref() == Some(row.id.as_str()) { "entity-row entity-row--selected" } else { "entity-row" },
                    if let Some((_, draft)) = renaming().filter(|(id, _)| *id == row.id) {
                        form {
                            class: "entity-main",
                            onsubmit: move |evt: FormEvent| {
                                evt.prevent_default();
                                if let Some((id, draft)) = renaming() {
                                    on_rename.call((id, draft.trim().to_string()));
                                }
                                renaming.set(None);
                            },
                            input {
                                value: "{draft}",
                                oninput: {
                                    let id = row.id.clone();
                                    move |evt: FormEvent| renaming.set(Some((id.clone(), evt.value())))
                                },
                            }
                            button { r#type: "submit", "Save" }
                            button {
                                r#type: "button",
                                onclick: move |_| renaming.set(None),
                                "Cancel"
                            }
                        }
                    } else {
                        div {
                            class: "entity-main",
                            onclick: {
                                let id = row.id.clone();
                                move |_| on_select.call(id.clone())
                            },
                            div { class: "entity-title", "{row.name}" }
                            div {
                                class: "entity-meta",
                                if row.is_private { "Private" } else { "Shared" }
                                if row.member_count > 0 { " · {row.member_count} members" }
                            }
                        }
                        div {
                            class: "entity-actions",
                            if row.controls.rename {
                                button {
                                    onclick: {
                                        let id = row.id.clone();
                                        let name = row.name.clone();
                                        move |_| renaming.set(Some((id.clone(), name.clone())))
                                    },
                                    "Rename"
                                }
                            }
                            if row.controls.delete {
                                button {
                                    onclick: {
                                        let id = row.id.clone();
                                        move |_| on_delete.call(id.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn MemberList(
    members: Collection<Membership>,
    capabilities: GroupCapabilities,
    on_remove: EventHandler<String>,
) -> Element {
    let state = use_collection(&members);
    let view = member_rows(&state(), &capabilities);
    if let Some(placeholder) = status(&view) {
        return placeholder;
    }
    let ListView::Rows(rows) = view else {
        return rsx! {};
    };

    rsx! {
        style { {LIST_STYLE} }
        ul {
            class: "entity-list",
            for row in rows {
                li {
                    key: "{row.user_id}",
                    class: "entity-row",
                    div {
                        class: "entity-main",
                        div { class: "entity-title", "{row.user_id}" }
                        div { class: "entity-meta", "{row.role}" }
                    }
                    if row.removable {
                        div {
                            class: "entity-actions",
                            button {
                                onclick: {
                                    let user_id = row.user_id.clone();
                                    move |_| on_remove.call(user_id.clone())
                                },
                                "Remove"
                            }
                        }
                    }
                }
            }
        }
    }
}
