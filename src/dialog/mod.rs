//! The one-at-a-time modal dialog.
//!
//! [`DialogController`] owns the single live [`DialogSession`] and drives
//! its lifecycle: open, confirm, cancel, dismiss. Opening while a session
//! is live is not an error; the old session is force-closed first
//! (supersession), so at most one dialog is ever mounted. A session's close
//! callback fires exactly once no matter how many of {confirm, cancel,
//! dismiss, supersession} race to trigger it.
//!
//! The controller holds no UI: mounting and unmounting go through the
//! host's [`HostShell`], and the host drives editing and the
//! confirm/cancel/dismiss transitions from its own input handling.

pub mod text_field;

use std::collections::BTreeMap;

use log::debug;

use crate::paths;
use crate::shell::HostShell;
use text_field::TextField;

/// An extra boolean choice shown alongside the text input.
#[derive(Debug, Clone)]
pub struct DialogOption {
    /// Key the choice is reported under in the confirm callback.
    pub name: String,
    /// User-visible description.
    pub label: String,
}

/// Current checked state of the named options.
pub type OptionStates = BTreeMap<String, bool>;

/// Everything needed to open one dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogRequest {
    /// Icon hint for the prompt label.
    pub icon: Option<char>,
    /// Prompt text displayed above the input.
    pub message: String,
    /// Initial content of the text input.
    pub initial_value: String,
    /// Pre-select only the filename stem of the initial value.
    pub select_basename: bool,
    /// Extra options; all start checked.
    pub options: Vec<DialogOption>,
}

impl DialogRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn select_basename(mut self) -> Self {
        self.select_basename = true;
        self
    }

    pub fn option(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(DialogOption {
            name: name.into(),
            label: label.into(),
        });
        self
    }
}

/// Called when the user confirms: the raw input value (trimming is the
/// caller's policy), the option states, and the shell for notifications.
pub type ConfirmFn = Box<dyn FnOnce(&str, &OptionStates, &mut dyn HostShell)>;

/// Called exactly once when the session closes, however it closes.
pub type CloseFn = Box<dyn FnOnce()>;

/// One open modal instance: prompt, live input state, callbacks.
pub struct DialogSession {
    request: DialogRequest,
    value: String,
    cursor: usize,
    /// Active char range of selected text, if any.
    selection: Option<(usize, usize)>,
    options: OptionStates,
    on_confirm: Option<ConfirmFn>,
    on_close: Option<CloseFn>,
    closed: bool,
}

impl DialogSession {
    fn new(request: DialogRequest, on_confirm: ConfirmFn, on_close: CloseFn) -> Self {
        let value = request.initial_value.clone();
        let cursor = value.chars().count();
        let selection = if request.select_basename && !value.is_empty() {
            let (start, end) = paths::basename_selection(&value);
            (start < end).then_some((start, end))
        } else {
            None
        };
        let options = request
            .options
            .iter()
            .map(|opt| (opt.name.clone(), true))
            .collect();
        Self {
            request,
            value,
            cursor,
            selection,
            options,
            on_confirm: Some(on_confirm),
            on_close: Some(on_close),
            closed: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.request.message
    }

    pub fn icon(&self) -> Option<char> {
        self.request.icon
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn option_labels(&self) -> &[DialogOption] {
        &self.request.options
    }

    pub fn options(&self) -> &OptionStates {
        &self.options
    }

    /// Drop any active selection, removing the selected text when `remove`
    /// is set. Editing replaces the selection; cursor movement collapses it.
    fn take_selection(&mut self, remove: bool) -> bool {
        let Some((start, end)) = self.selection.take() else {
            return false;
        };
        if remove {
            TextField::remove_range(&mut self.value, &mut self.cursor, start, end);
        }
        true
    }

    fn insert_char(&mut self, c: char) {
        self.take_selection(true);
        TextField::insert_char(&mut self.value, &mut self.cursor, c);
    }

    fn backspace(&mut self) {
        if !self.take_selection(true) {
            TextField::backspace(&mut self.value, &mut self.cursor);
        }
    }

    fn delete(&mut self) {
        if !self.take_selection(true) {
            TextField::delete(&mut self.value, self.cursor);
        }
    }

    /// Fire the close callback, at most once. Every close path funnels
    /// through here.
    fn fire_close(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Some(on_close) = self.on_close.take() {
                on_close();
            }
        }
    }
}

/// Owner of the single live dialog session.
#[derive(Default)]
pub struct DialogController {
    session: Option<DialogSession>,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DialogSession> {
        self.session.as_ref()
    }

    /// Open a dialog. A session already live is superseded: force-closed
    /// (its close callback fires, its confirm never does) and unmounted
    /// before the new one mounts.
    pub fn open(
        &mut self,
        request: DialogRequest,
        on_confirm: ConfirmFn,
        on_close: CloseFn,
        shell: &mut dyn HostShell,
    ) {
        if self.is_open() {
            debug!("dialog superseded by new open");
            self.close_current(shell);
        }
        let session = DialogSession::new(request, on_confirm, on_close);
        shell.mount_dialog(&session);
        self.session = Some(session);
    }

    /// Confirm the open dialog: runs the confirm callback with the current
    /// value and option states, then closes. No-op when nothing is open.
    pub fn confirm(&mut self, shell: &mut dyn HostShell) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let value = session.value.clone();
        let options = session.options.clone();
        if let Some(on_confirm) = session.on_confirm.take() {
            on_confirm(&value, &options, shell);
        }
        session.fire_close();
        shell.unmount_dialog();
    }

    /// Cancel the open dialog without confirming.
    pub fn cancel(&mut self, shell: &mut dyn HostShell) {
        self.close_current(shell);
    }

    /// Host-detected dismissal gesture (outside click, focus loss). Same
    /// outcome as cancel.
    pub fn dismiss(&mut self, shell: &mut dyn HostShell) {
        self.close_current(shell);
    }

    fn close_current(&mut self, shell: &mut dyn HostShell) {
        if let Some(mut session) = self.session.take() {
            session.fire_close();
            shell.unmount_dialog();
        }
    }

    // Editing surface the host routes its key events to.

    pub fn input_char(&mut self, c: char) {
        if let Some(session) = &mut self.session {
            session.insert_char(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(session) = &mut self.session {
            session.backspace();
        }
    }

    pub fn input_delete(&mut self) {
        if let Some(session) = &mut self.session {
            session.delete();
        }
    }

    pub fn input_left(&mut self) {
        if let Some(session) = &mut self.session {
            session.take_selection(false);
            TextField::left(&mut session.cursor);
        }
    }

    pub fn input_right(&mut self) {
        if let Some(session) = &mut self.session {
            session.take_selection(false);
            TextField::right(&session.value, &mut session.cursor);
        }
    }

    pub fn input_home(&mut self) {
        if let Some(session) = &mut self.session {
            session.take_selection(false);
            TextField::home(&mut session.cursor);
        }
    }

    pub fn input_end(&mut self) {
        if let Some(session) = &mut self.session {
            session.take_selection(false);
            TextField::end(&session.value, &mut session.cursor);
        }
    }

    /// Flip the checked state of a named option.
    pub fn toggle_option(&mut self, name: &str) {
        if let Some(session) = &mut self.session
            && let Some(state) = session.options.get_mut(name)
        {
            *state = !*state;
        }
    }
}
