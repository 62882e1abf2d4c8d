//! Filesystem backends for tree entries.
//!
//! A tree node key resolves to exactly one [`EntryHandle`], a tagged union
//! over the two backend variants:
//! - `Local`: entries on the local disk
//! - `Remote`: entries reached through a [`RemoteFs`] client session
//!
//! Handles are derived on demand from node keys and are never cached past
//! the operation that resolved them. Operations must not assume the entry
//! still exists at call time; collisions are reported as normal outcomes,
//! not errors.

mod local;
mod remote;

pub use local::LocalEntry;
pub use remote::RemoteEntry;

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::tree::NodeKey;

/// Error type for backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// What a tree entry is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Contract for a remote filesystem client session.
///
/// This crate ships no concrete network client; hosts plug in whatever
/// transport they use. All paths are remote-absolute strings. Results are
/// best-effort: the session reports what the far side told it and callers
/// must not assume atomicity.
///
/// `create_*` and `copy` report a pre-existing destination as `Ok(false)`
/// rather than an error; a collision is a normal, reportable outcome.
pub trait RemoteFs: Send {
    /// Whether the session is still usable.
    fn is_connected(&self) -> bool;

    /// Check whether a path exists on the remote side.
    fn exists(&mut self, path: &str) -> BackendResult<bool>;

    /// Create an empty file. `Ok(false)` if the path was already taken.
    fn create_file(&mut self, path: &str) -> BackendResult<bool>;

    /// Create a directory. `Ok(false)` if the path was already taken.
    fn create_dir(&mut self, path: &str) -> BackendResult<bool>;

    /// Rename/move an entry.
    fn rename(&mut self, from: &str, to: &str) -> BackendResult<()>;

    /// Copy an entry. `Ok(false)` if the destination was already taken;
    /// the client must refuse to overwrite.
    fn copy(&mut self, from: &str, to: &str) -> BackendResult<bool>;
}

/// A remote session shared between the tree, the coordinator, and whatever
/// background machinery the host runs. The mutex is the session lock.
pub type SharedRemoteFs = Arc<Mutex<Box<dyn RemoteFs + Send>>>;

/// Resolves a remote authority (`user@host[:port]`) to its live session.
///
/// Returning `None` models a dropped connection: the entry handle cannot be
/// derived and the operation in progress silently no-ops.
pub trait ConnectionRegistry {
    fn remote(&self, authority: &str) -> Option<SharedRemoteFs>;
}

/// Registry for hosts with no remote mounts. Every lookup misses.
pub struct NoRemotes;

impl ConnectionRegistry for NoRemotes {
    fn remote(&self, _authority: &str) -> Option<SharedRemoteFs> {
        None
    }
}

/// Where a node key points, decoded from the key string.
///
/// Keys are opaque to everything above this module. The grammar:
/// `scp://user@host[:port]/path` is remote (authority up to the first `/`),
/// anything else is a local absolute path. A trailing separator marks a
/// directory key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLocation {
    Local {
        path: String,
        kind: EntryKind,
    },
    Remote {
        authority: String,
        path: String,
        kind: EntryKind,
    },
}

impl EntryLocation {
    pub fn parse(key: &str) -> Self {
        let kind = if key.ends_with('/') {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        if let Some(rest) = key.strip_prefix("scp://") {
            let (authority, path) = match rest.find('/') {
                Some(idx) => (&rest[..idx], &rest[idx..]),
                None => (rest, "/"),
            };
            EntryLocation::Remote {
                authority: authority.to_string(),
                path: normalize_dir_key(path),
                kind,
            }
        } else {
            EntryLocation::Local {
                path: normalize_dir_key(key),
                kind,
            }
        }
    }

    /// The canonical local-style path, irrespective of backend. This is the
    /// representation the version-control layer understands.
    pub fn local_path(&self) -> &str {
        match self {
            EntryLocation::Local { path, .. } => path,
            EntryLocation::Remote { path, .. } => path,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            EntryLocation::Local { kind, .. } => *kind,
            EntryLocation::Remote { kind, .. } => *kind,
        }
    }
}

/// Strip the directory marker, keeping the filesystem root intact.
fn normalize_dir_key(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A file or directory on one backend, exposing the uniform mutation
/// contract. Callers go through these methods, or pattern-match the
/// variant when a flow genuinely differs per backend; the concrete entry
/// types never leak past this module.
pub enum EntryHandle {
    Local(LocalEntry),
    Remote(RemoteEntry),
}

impl EntryHandle {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryHandle::Local(e) => e.kind(),
            EntryHandle::Remote(e) => e.kind(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    /// Display path: the local path, or `scp://authority/path` for remote
    /// entries.
    pub fn path(&self) -> String {
        match self {
            EntryHandle::Local(e) => e.path_string(),
            EntryHandle::Remote(e) => e.display_path(),
        }
    }

    /// Canonical local-style path (no scheme, no authority). Used to talk
    /// to the version-control layer.
    pub fn local_path(&self) -> String {
        match self {
            EntryHandle::Local(e) => e.path_string(),
            EntryHandle::Remote(e) => e.remote_path().to_string(),
        }
    }

    /// Handle for the containing directory, `None` at a filesystem root.
    pub fn parent(&self) -> Option<EntryHandle> {
        match self {
            EntryHandle::Local(e) => e.parent().map(EntryHandle::Local),
            EntryHandle::Remote(e) => e.parent().map(EntryHandle::Remote),
        }
    }

    /// Handle for a named child of this directory. The child does not have
    /// to exist; this is how creation targets are derived.
    pub fn child(&self, name: &str, kind: EntryKind) -> EntryHandle {
        match self {
            EntryHandle::Local(e) => EntryHandle::Local(e.child(name, kind)),
            EntryHandle::Remote(e) => EntryHandle::Remote(e.child(name, kind)),
        }
    }

    /// Whether the entry currently exists. Advisory only: anything can
    /// change between this check and a mutation.
    pub fn exists(&self) -> BackendResult<bool> {
        match self {
            EntryHandle::Local(e) => e.exists(),
            EntryHandle::Remote(e) => e.exists(),
        }
    }

    /// Create the entry. `Ok(false)` means it already existed and nothing
    /// was done.
    pub fn create(&self) -> BackendResult<bool> {
        match self {
            EntryHandle::Local(e) => e.create(),
            EntryHandle::Remote(e) => e.create(),
        }
    }

    /// Rename the entry to a new local-style path on the same backend.
    pub fn rename(&self, new_path: &str) -> BackendResult<()> {
        match self {
            EntryHandle::Local(e) => e.rename(new_path),
            EntryHandle::Remote(e) => e.rename(new_path),
        }
    }

    /// Copy the entry to a new local-style path on the same backend.
    /// `Ok(false)` means the destination was already taken and nothing was
    /// copied.
    pub fn copy_to(&self, new_path: &str) -> BackendResult<bool> {
        match self {
            EntryHandle::Local(e) => e.copy_to(new_path),
            EntryHandle::Remote(e) => e.copy_to(new_path),
        }
    }
}

/// Derives backend handles from node keys.
///
/// Handles are cheap and re-derived per use; a stale key (unknown remote
/// authority, dropped connection) resolves to `None`.
#[derive(Clone)]
pub struct EntryResolver {
    connections: Rc<dyn ConnectionRegistry>,
}

impl EntryResolver {
    pub fn new(connections: Rc<dyn ConnectionRegistry>) -> Self {
        Self { connections }
    }

    /// Resolver for hosts that only mount the local filesystem.
    pub fn local_only() -> Self {
        Self::new(Rc::new(NoRemotes))
    }

    pub fn entry_for_key(&self, key: &NodeKey) -> Option<EntryHandle> {
        match EntryLocation::parse(key.as_str()) {
            EntryLocation::Local { path, kind } => {
                Some(EntryHandle::Local(LocalEntry::new(path.into(), kind)))
            }
            EntryLocation::Remote {
                authority,
                path,
                kind,
            } => {
                let session = self.connections.remote(&authority)?;
                Some(EntryHandle::Remote(RemoteEntry::new(
                    session, authority, path, kind,
                )))
            }
        }
    }
}
