//! In-app log of user-visible outcomes (saved, deleted, failed, signed out).

use api::ClientError;
use dioxus::prelude::*;

/// Oldest entries are dropped past this many.
pub const MAX_ENTRIES: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    log.write().push(level, message);
}

/// Record a failed action. Expired sessions are logged as warnings since the
/// user is sent back to the login page anyway.
pub fn log_failure(log: &mut Signal<ActivityLog>, action: &str, err: &ClientError) {
    let level = if err.requires_login() {
        LogLevel::Warning
    } else {
        LogLevel::Error
    };
    tracing::warn!("{action} failed: {err}");
    log.write().push(level, format!("{action} failed: {err}"));
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_capped() {
        let mut log = ActivityLog::default();
        for i in 0..MAX_ENTRIES + 10 {
            log.push(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "entry 10");
        assert!(!log.has_errors());

        log.push(LogLevel::Error, "boom");
        assert!(log.has_errors());
        assert_eq!(log.entries.len(), MAX_ENTRIES);
    }
}
