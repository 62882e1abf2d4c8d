//! Host UI shell contract.
//!
//! The shell is whatever surrounds this crate: an editor workspace, a TUI,
//! a test harness. It owns rendering and key bindings; this crate only asks
//! it to mount/unmount the one modal dialog and to surface error
//! notifications.
//!
//! Dismissal gestures (a click outside the dialog, focus loss) are the
//! host's to detect: when one happens the host must call
//! [`DialogController::dismiss`](crate::dialog::DialogController::dismiss).
//! Likewise the host routes its confirm/cancel key bindings to
//! [`confirm`](crate::dialog::DialogController::confirm) and
//! [`cancel`](crate::dialog::DialogController::cancel).

use crate::dialog::DialogSession;

pub trait HostShell {
    /// Show the dialog. Called with the freshly opened session; at most one
    /// session is ever mounted at a time.
    fn mount_dialog(&mut self, session: &DialogSession);

    /// Remove the dialog from the UI. Paired with every mount.
    fn unmount_dialog(&mut self);

    /// Surface a user-visible error notification.
    fn notify_error(&mut self, message: &str);
}
