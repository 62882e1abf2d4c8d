//! Version-control integration for history-preserving renames.
//!
//! The coordinator asks a [`RepoRegistry`] for the working copy governing a
//! path and, when the repository is of the supported kind, routes a rename
//! through it so history follows the file. A repository that declines
//! (`Ok(false)`) sends the coordinator back to the plain filesystem rename;
//! a repository that performed the move suppresses it.
//!
//! Paths handed to this layer are always canonical local-style paths; the
//! repository tooling does not understand remote descriptors.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::warn;

use crate::backend::{BackendError, BackendResult};

/// Repository type discriminant. Only the supported kind is routed through
/// the version-control rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoKind {
    Git,
    Other,
}

/// One checked-out working copy.
pub trait WorkingCopy {
    fn kind(&self) -> RepoKind;

    /// Ask the repository to perform the move itself. `Ok(true)` means it
    /// did and the filesystem already reflects the new path; `Ok(false)`
    /// means it declined and the caller still owns the rename.
    fn rename(&mut self, old_local_path: &str, new_local_path: &str) -> BackendResult<bool>;
}

/// Resolves the working copy governing a path. A fresh working copy is
/// derived per lookup; nothing is cached across operations.
pub trait RepoRegistry {
    fn repository_for(&self, local_path: &str) -> Option<Box<dyn WorkingCopy>>;
}

/// Registry for hosts without version-control integration.
pub struct NoRepos;

impl RepoRegistry for NoRepos {
    fn repository_for(&self, _local_path: &str) -> Option<Box<dyn WorkingCopy>> {
        None
    }
}

/// Working copy driven through the `git` binary.
pub struct GitWorkingCopy {
    root: PathBuf,
}

impl GitWorkingCopy {
    /// Find the working copy containing `path`, if any. Resolution failures
    /// (no git binary, not a repository) are a plain `None`.
    pub fn discover(path: &Path) -> Option<Self> {
        let dir = if path.is_dir() {
            path
        } else {
            path.parent()?
        };
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return None;
        }
        Some(Self {
            root: PathBuf::from(root),
        })
    }
}

impl WorkingCopy for GitWorkingCopy {
    fn kind(&self) -> RepoKind {
        RepoKind::Git
    }

    fn rename(&mut self, old_local_path: &str, new_local_path: &str) -> BackendResult<bool> {
        let output = Command::new("git")
            .args(["mv", old_local_path, new_local_path])
            .current_dir(&self.root)
            .output()
            .map_err(|e| BackendError::Other(format!("could not run git: {e}")))?;
        if output.status.success() {
            Ok(true)
        } else {
            // Untracked files and the like: git declines, the caller falls
            // back to the filesystem rename.
            warn!(
                "git mv declined: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            Ok(false)
        }
    }
}

/// Registry that discovers git working copies on demand.
///
/// Discovery runs against the host filesystem, so this registry is only
/// correct for local-only mounts: a remote entry's canonical path could
/// coincide with an unrelated local checkout. Hosts with remote mounts
/// plug a remote-aware [`RepoRegistry`] into the coordinator instead.
pub struct GitRepoRegistry;

impl RepoRegistry for GitRepoRegistry {
    fn repository_for(&self, local_path: &str) -> Option<Box<dyn WorkingCopy>> {
        let repo = GitWorkingCopy::discover(Path::new(local_path))?;
        Some(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_outside_any_repository() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(GitWorkingCopy::discover(tmp.path()).is_none());
    }

    #[test]
    fn test_registry_misses_outside_any_repository() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = GitRepoRegistry;
        let path = tmp.path().join("file.txt");
        assert!(registry.repository_for(path.to_str().unwrap()).is_none());
    }

    #[test]
    fn test_no_repos_registry() {
        assert!(NoRepos.repository_for("/anywhere/file.txt").is_none());
    }
}
