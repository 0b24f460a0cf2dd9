use api::ClientError;
use dioxus::prelude::*;
use ui::{log_failure, sign_out_on_expiry, ActivityLog, AuthState};

use crate::Route;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod shell;
pub use shell::Shell;

mod notes;
pub use notes::{NoteBoard, Notes};

mod groups;
pub use groups::Groups;

/// Log a failed action and send the user to the login page when the session is gone.
pub(crate) fn report_failure(
    auth: Signal<AuthState>,
    mut log: Signal<ActivityLog>,
    action: &str,
    err: &ClientError,
) {
    log_failure(&mut log, action, err);
    if sign_out_on_expiry(auth, err) {
        navigator().replace(Route::Login {});
    }
}
