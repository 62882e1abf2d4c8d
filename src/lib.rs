//! Mutation coordination for a file-tree browser.
//!
//! The host application owns the tree UI, the input loop, and the remote
//! connections; this crate owns what happens when the user asks to change
//! the tree. It resolves the current selection to an operation target,
//! drives the single modal confirmation dialog, and dispatches the
//! confirmed mutation (add folder, add file, rename, duplicate) against
//! the right backend, local disk or a remote session. Renames go through
//! the version-control layer first so history follows the file.
//!
//! The host plugs in at four seams:
//! - [`tree::TreeStore`]: the tree data and selection
//! - [`shell::HostShell`]: dialog mounting and error notifications
//! - [`backend::ConnectionRegistry`]: live remote sessions by authority
//! - [`vcs::RepoRegistry`]: working-copy lookup for renames
//!
//! [`actions::FileTreeActions`] ties them together, one method per
//! operation.

pub mod actions;
pub mod backend;
pub mod config;
pub mod dialog;
pub mod errors;
pub mod paths;
pub mod shell;
pub mod tree;
pub mod vcs;

pub use actions::FileTreeActions;
pub use backend::{
    BackendError, BackendResult, ConnectionRegistry, EntryHandle, EntryKind, EntryResolver,
    RemoteFs, SharedRemoteFs,
};
pub use config::Config;
pub use dialog::{DialogController, DialogRequest, DialogSession};
pub use errors::{AppError, AppResult};
pub use shell::HostShell;
pub use tree::{NodeKey, TreeNode, TreeStore};
pub use vcs::{RepoKind, RepoRegistry};
