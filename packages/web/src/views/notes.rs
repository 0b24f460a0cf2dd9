use dioxus::prelude::*;

use api::AppState;
use store::{Note, NoteDraft, NoteScope};
use ui::{log_activity, use_activity_log, use_app, use_auth, LogLevel, NoteList, PlatformStore};

use super::report_failure;

const NOTES_STYLE: &str = r#"
.note-form { display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1.25rem; }
.note-form input, .note-form textarea { padding: 0.5rem 0.625rem; border: 1px solid #e3e2e0; border-radius: 4px; font: inherit; }
.note-form textarea { min-height: 6rem; resize: vertical; }
.note-form-actions { display: flex; gap: 0.5rem; }
"#;

/// Personal notes page.
#[component]
pub fn Notes() -> Element {
    rsx! {
        h2 { "My notes" }
        NoteBoard { scope: NoteScope::Personal }
    }
}

fn controller(
    app: &AppState<PlatformStore>,
    scope: &NoteScope,
) -> Option<api::Notes<PlatformStore>> {
    match scope {
        NoteScope::Personal => Some(app.personal_notes().clone()),
        NoteScope::Group(id) => app
            .active_group()
            .filter(|group| &group.id == id)
            .map(|group| group.notes),
    }
}

/// Editor plus list for one note scope. Used for personal notes and, keyed by
/// group id, for the selected group.
#[component]
pub fn NoteBoard(scope: NoteScope) -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let mut editing = use_signal(|| Option::<String>::None);
    let mut title = use_signal(String::new);
    let mut body = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let Some(notes) = use_app().and_then(|app| controller(&app, &scope)) else {
        return rsx! {};
    };

    let reset_form = move || {
        let (mut editing, mut title, mut body) = (editing, title, body);
        editing.set(None);
        title.set(String::new());
        body.set(String::new());
    };

    let save = {
        let notes = notes.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let notes = notes.clone();
            spawn(async move {
                let text = body();
                if text.trim().is_empty() {
                    return;
                }
                let mut draft = NoteDraft::new(text);
                let heading = title().trim().to_string();
                if !heading.is_empty() {
                    draft = draft.with_title(heading);
                }

                saving.set(true);
                let result = match editing() {
                    Some(id) => notes.update(&id, &draft).await,
                    None => notes.create(&draft).await.map(|_| ()),
                };
                saving.set(false);

                match result {
                    Ok(()) => {
                        let mut log = log;
                        log_activity(&mut log, LogLevel::Success, "Note saved");
                        reset_form();
                    }
                    Err(err) => report_failure(auth, log, "Saving the note", &err),
                }
            });
        }
    };

    let edit = move |note: Note| {
        editing.set(Some(note.id.clone()));
        title.set(note.title.clone().unwrap_or_default());
        body.set(note.body.clone());
    };

    let delete = {
        let notes = notes.clone();
        move |id: String| {
            let notes = notes.clone();
            spawn(async move {
                match notes.delete(&id).await {
                    Ok(()) => {
                        if editing().as_deref() == Some(id.as_str()) {
                            reset_form();
                        }
                        let mut log = log;
                        log_activity(&mut log, LogLevel::Info, "Note deleted");
                    }
                    Err(err) => report_failure(auth, log, "Deleting the note", &err),
                }
            });
        }
    };

    rsx! {
        style { {NOTES_STYLE} }

        form {
            class: "note-form",
            onsubmit: save,
            input {
                placeholder: "Title (optional)",
                value: title(),
                oninput: move |evt: FormEvent| title.set(evt.value()),
            }
            textarea {
                placeholder: "Write a note...",
                value: body(),
                oninput: move |evt: FormEvent| body.set(evt.value()),
            }
            div {
                class: "note-form-actions",
                button {
                    r#type: "submit",
                    disabled: saving() || body().trim().is_empty(),
                    if editing().is_some() { "Update note" } else { "Add note" }
                }
                if editing().is_some() {
                    button {
                        r#type: "button",
                        onclick: move |_| reset_form(),
                        "Cancel"
                    }
                }
            }
        }

        NoteList {
            notes: notes.cache().clone(),
            on_edit: edit,
            on_delete: delete,
        }
    }
}
