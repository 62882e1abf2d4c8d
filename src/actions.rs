//! The file mutation coordinator.
//!
//! One entry point per user-facing operation: add folder, add file, rename,
//! duplicate. Each resolves its target from the current selection, opens
//! the modal dialog with operation-specific prompt text, and on confirm
//! performs the backend mutation. The backend handle is re-resolved at
//! confirm time, collisions are reported as error notifications, and
//! renames route through the version-control layer before falling back to
//! a plain filesystem rename.
//!
//! Failure policy, shared by all four operations: a collision or backend
//! failure surfaces as a notification naming the offending entry and a
//! `None` completion; a selection of the wrong shape or a stale node key
//! makes the operation a silent no-op. Nothing here panics and no error
//! escapes past a confirm callback.

use std::rc::Rc;

use log::{debug, warn};

use crate::backend::{EntryHandle, EntryKind, EntryResolver};
use crate::config::Config;
use crate::dialog::{ConfirmFn, DialogController, DialogRequest};
use crate::paths;
use crate::shell::HostShell;
use crate::tree::selection::{resolve_container_target, resolve_single_target};
use crate::tree::{NodeKey, TreeStore};
use crate::vcs::{RepoKind, RepoRegistry};

/// Completion callback: the created/copied entry's path, or `None` when
/// the operation aborted or failed.
pub type DoneFn = Box<dyn FnOnce(Option<String>)>;

/// The operation coordinator. Holds the collaborators every operation
/// needs; the dialog controller and host shell are passed per call because
/// the host owns them.
pub struct FileTreeActions {
    store: Rc<dyn TreeStore>,
    resolver: EntryResolver,
    repos: Rc<dyn RepoRegistry>,
    config: Config,
}

impl FileTreeActions {
    pub fn new(
        store: Rc<dyn TreeStore>,
        resolver: EntryResolver,
        repos: Rc<dyn RepoRegistry>,
        config: Config,
    ) -> Self {
        Self {
            store,
            resolver,
            repos,
            config,
        }
    }

    /// Open the add-folder dialog for the selected container.
    pub fn open_add_folder_dialog(
        &self,
        dialogs: &mut DialogController,
        shell: &mut dyn HostShell,
        on_did_confirm: impl FnOnce(Option<String>) + 'static,
    ) {
        self.open_add_dialog(
            EntryKind::Directory,
            dialogs,
            shell,
            Box::new(on_did_confirm),
        );
    }

    /// Open the add-file dialog for the selected container.
    pub fn open_add_file_dialog(
        &self,
        dialogs: &mut DialogController,
        shell: &mut dyn HostShell,
        on_did_confirm: impl FnOnce(Option<String>) + 'static,
    ) {
        self.open_add_dialog(EntryKind::File, dialogs, shell, Box::new(on_did_confirm));
    }

    fn open_add_dialog(
        &self,
        kind: EntryKind,
        dialogs: &mut DialogController,
        shell: &mut dyn HostShell,
        on_did_confirm: DoneFn,
    ) {
        let Some(container) = resolve_container_target(self.store.as_ref()) else {
            return;
        };
        let entry_type = match kind {
            EntryKind::Directory => "folder",
            EntryKind::File => "file",
        };
        let message = format!(
            "Enter the path for the new {} in the root:\n{}/",
            entry_type,
            container.local_path()
        );

        let resolver = self.resolver.clone();
        let container_key = container.key.clone();
        let on_confirm: ConfirmFn = Box::new(move |value, _options, shell| {
            // A blank field never creates anything.
            let name = value.trim();
            if name.is_empty() {
                return;
            }
            let Some(dir) = resolver.entry_for_key(&container_key) else {
                debug!("add {entry_type}: container key {container_key} went stale");
                return;
            };
            let entry = dir.child(name, kind);
            match entry.create() {
                Ok(true) => {
                    debug!("created {}", entry.path());
                    on_did_confirm(Some(entry.path()));
                }
                Ok(false) => {
                    shell.notify_error(&format!("'{name}' already exists."));
                    on_did_confirm(None);
                }
                Err(e) => {
                    warn!("creating {} failed: {e}", entry.path());
                    shell.notify_error(&format!("Could not create '{}'", entry.path()));
                    on_did_confirm(None);
                }
            }
        });

        dialogs.open(
            DialogRequest::new(message).icon('+'),
            on_confirm,
            Box::new(|| {}),
            shell,
        );
    }

    /// Open the rename dialog for the single selected node. A selection of
    /// any other size is a no-op; only one entry renames at a time.
    pub fn open_rename_dialog(&self, dialogs: &mut DialogController, shell: &mut dyn HostShell) {
        let Some(node) = resolve_single_target(self.store.as_ref()) else {
            return;
        };
        let node_path = node.local_path();
        let initial = paths::base_name(&node_path).to_string();
        let message = if node.is_container() {
            "Enter the new path for the directory."
        } else {
            "Enter the new path for the file."
        };

        let resolver = self.resolver.clone();
        let repos = self.repos.clone();
        let vcs_rename = self.config.vcs.history_preserving_rename;
        let node_key = node.key.clone();
        let on_confirm: ConfirmFn = Box::new(move |value, _options, shell| {
            let new_base = value.trim();
            if new_base.is_empty() {
                return;
            }
            let outcome = confirm_rename(&resolver, repos.as_ref(), vcs_rename, &node_key, new_base);
            if let Err(e) = outcome {
                warn!("renaming {node_path} failed: {e}");
                shell.notify_error(&format!("Rename to {new_base} failed"));
            }
        });

        dialogs.open(
            DialogRequest::new(message)
                .icon('→')
                .initial_value(initial)
                .select_basename(),
            on_confirm,
            Box::new(|| {}),
            shell,
        );
    }

    /// Open the duplicate dialog for the single selected node, pre-filled
    /// with the default duplicate name (`<stem>{suffix}<ext>`).
    pub fn open_duplicate_dialog(
        &self,
        dialogs: &mut DialogController,
        shell: &mut dyn HostShell,
        on_did_confirm: impl FnOnce(Option<String>) + 'static,
    ) {
        let Some(node) = resolve_single_target(self.store.as_ref()) else {
            return;
        };
        let node_path = node.local_path();
        let initial = paths::duplicate_name(
            paths::base_name(&node_path),
            &self.config.operations.duplicate_suffix,
        );

        let resolver = self.resolver.clone();
        let node_key = node.key.clone();
        let on_did_confirm: DoneFn = Box::new(on_did_confirm);
        let on_confirm: ConfirmFn = Box::new(move |value, _options, shell| {
            let name = value.trim();
            if name.is_empty() {
                return;
            }
            let Some(entry) = resolver.entry_for_key(&node_key) else {
                debug!("duplicate: node key {node_key} went stale");
                return;
            };
            confirm_duplicate(entry, name, shell, on_did_confirm);
        });

        dialogs.open(
            DialogRequest::new("Enter the new path for the duplicate.")
                .icon('→')
                .initial_value(initial)
                .select_basename(),
            on_confirm,
            Box::new(|| {}),
            shell,
        );
    }
}

/// Perform a confirmed rename. Resolution order: a supported-kind
/// repository gets to move the entry first (so history follows it); only
/// when there is no such repository, or it declines, does the plain backend
/// rename run, never both.
fn confirm_rename(
    resolver: &EntryResolver,
    repos: &dyn RepoRegistry,
    vcs_rename: bool,
    node_key: &NodeKey,
    new_base: &str,
) -> crate::backend::BackendResult<()> {
    let Some(entry) = resolver.entry_for_key(node_key) else {
        // Connection could have been lost for a remote entry.
        debug!("rename: node key {node_key} went stale");
        return Ok(());
    };
    let old_path = entry.local_path();
    let new_path = paths::rename_target(&old_path, new_base);

    if vcs_rename
        && let Some(mut repo) = repos.repository_for(&old_path)
        && repo.kind() == RepoKind::Git
    {
        if repo.rename(&old_path, &new_path)? {
            debug!("repository moved {old_path} to {new_path}");
            return Ok(());
        }
        debug!("repository declined rename of {old_path}, using plain rename");
    }
    entry.rename(&new_path)
}

/// Perform a confirmed duplicate into the entry's own parent directory.
fn confirm_duplicate(entry: EntryHandle, name: &str, shell: &mut dyn HostShell, done: DoneFn) {
    let Some(parent) = entry.parent() else {
        // A mounted root has nowhere to put its duplicate.
        return;
    };
    let dest = parent.child(name, entry.kind());

    match &entry {
        EntryHandle::Local(_) => {
            // Existence check and copy are two separate steps; an entry
            // created in between loses the race and the copy reports the
            // collision instead.
            match dest.exists() {
                Ok(true) => {
                    shell.notify_error(&format!("'{}' already exists.", dest.path()));
                    done(None);
                }
                Ok(false) => match entry.copy_to(&dest.local_path()) {
                    Ok(true) => {
                        debug!("duplicated {} to {}", entry.path(), dest.path());
                        done(Some(dest.path()));
                    }
                    Ok(false) => {
                        shell.notify_error(&format!("'{}' already exists.", dest.path()));
                        done(None);
                    }
                    Err(e) => {
                        warn!("duplicating {} failed: {e}", entry.path());
                        shell.notify_error(&format!("Could not duplicate to '{}'", dest.path()));
                        done(None);
                    }
                },
                Err(e) => {
                    warn!("checking {} failed: {e}", dest.path());
                    shell.notify_error(&format!("Could not duplicate to '{}'", dest.path()));
                    done(None);
                }
            }
        }
        EntryHandle::Remote(_) => {
            // The remote client owns collision detection for its copy.
            match entry.copy_to(&dest.local_path()) {
                Ok(true) => {
                    debug!("duplicated {} to {}", entry.path(), dest.path());
                    done(Some(dest.path()));
                }
                Ok(false) => {
                    shell.notify_error(&format!("'{}' already exists.", dest.path()));
                    done(None);
                }
                Err(e) => {
                    warn!("duplicating {} failed: {e}", entry.path());
                    shell.notify_error(&format!("Could not duplicate to '{}'", dest.path()));
                    done(None);
                }
            }
        }
    }
}
