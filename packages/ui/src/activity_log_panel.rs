use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};

const ACTIVITY_LOG_STYLE: &str = r#"
.activity-log-panel { position: fixed; right: 1rem; bottom: 3.5rem; width: 22rem; max-height: 40vh; display: flex; flex-direction: column; background: #fff; border: 1px solid #e3e2e0; border-radius: 6px; box-shadow: 0 4px 16px rgba(0,0,0,0.08); font-size: 0.8125rem; }
.activity-log-header { display: flex; justify-content: space-between; padding: 0.5rem 0.75rem; border-bottom: 1px solid #ececea; font-weight: 600; }
.activity-log-entries { overflow-y: auto; padding: 0.25rem 0.75rem; }
.activity-log-entry { padding: 0.25rem 0; }
.activity-log-entry.error { color: #d44c47; }
.activity-log-entry.warning { color: #cb912f; }
.activity-log-entry.success { color: #448361; }
.activity-log-time { color: #9b9a97; font-variant-numeric: tabular-nums; }
.activity-log-toggle { position: fixed; right: 1rem; bottom: 1rem; }
.activity-log-toggle.has-errors { color: #d44c47; }
"#;

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let entries = log().entries.clone();

    rsx! {
        style { {ACTIVITY_LOG_STYLE} }

        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Activity" }
                div {
                    button {
                        onclick: move |_| log.write().entries.clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                class: "activity-log-entries",
                if entries.is_empty() {
                    p { "Nothing yet." }
                }
                for entry in entries.iter().rev() {
                    div {
                        class: match entry.level {
                            LogLevel::Error => "activity-log-entry error",
                            LogLevel::Warning => "activity-log-entry warning",
                            LogLevel::Success => "activity-log-entry success",
                            LogLevel::Info => "activity-log-entry info",
                        },
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.message}" }
                    }
                }
            }
        }
    }
}

/// Floating button that shows the entry count and opens the panel.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log().entries.len();
    let has_errors = log().has_errors();

    rsx! {
        style { {ACTIVITY_LOG_STYLE} }
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Activity log",
            if count > 0 { "Activity ({count})" } else { "Activity" }
        }
    }
}
