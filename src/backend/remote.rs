//! Remote filesystem entries
//!
//! A remote entry pairs a local-style path with the shared client session
//! for its authority. All mutations go through the session lock; results
//! are whatever the remote side reported, with no atomicity guarantee.

use std::sync::MutexGuard;

use super::{BackendError, BackendResult, EntryKind, RemoteFs, SharedRemoteFs};
use crate::paths;

/// One entry on a remote backend.
#[derive(Clone)]
pub struct RemoteEntry {
    session: SharedRemoteFs,
    authority: String,
    path: String,
    kind: EntryKind,
}

impl RemoteEntry {
    pub fn new(session: SharedRemoteFs, authority: String, path: String, kind: EntryKind) -> Self {
        Self {
            session,
            authority,
            path,
            kind,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The path component, local-style. This is what the version-control
    /// layer and rename targets use.
    pub fn remote_path(&self) -> &str {
        &self.path
    }

    /// Full display path including scheme and authority.
    pub fn display_path(&self) -> String {
        format!("scp://{}{}", self.authority, self.path)
    }

    pub fn parent(&self) -> Option<RemoteEntry> {
        if self.path == "/" {
            return None;
        }
        Some(RemoteEntry::new(
            self.session.clone(),
            self.authority.clone(),
            paths::dir_name(&self.path).to_string(),
            EntryKind::Directory,
        ))
    }

    pub fn child(&self, name: &str, kind: EntryKind) -> RemoteEntry {
        RemoteEntry::new(
            self.session.clone(),
            self.authority.clone(),
            paths::join(&self.path, name),
            kind,
        )
    }

    fn lock(&self) -> BackendResult<MutexGuard<'_, Box<dyn RemoteFs + Send>>> {
        self.session
            .lock()
            .map_err(|_| BackendError::Connection("remote session lock poisoned".to_string()))
    }

    pub fn exists(&self) -> BackendResult<bool> {
        let mut session = self.lock()?;
        if !session.is_connected() {
            return Err(BackendError::Connection(format!(
                "connection to {} lost",
                self.authority
            )));
        }
        session.exists(&self.path)
    }

    pub fn create(&self) -> BackendResult<bool> {
        let mut session = self.lock()?;
        match self.kind {
            EntryKind::Directory => session.create_dir(&self.path),
            EntryKind::File => session.create_file(&self.path),
        }
    }

    pub fn rename(&self, new_path: &str) -> BackendResult<()> {
        self.lock()?.rename(&self.path, new_path)
    }

    pub fn copy_to(&self, new_path: &str) -> BackendResult<bool> {
        self.lock()?.copy(&self.path, new_path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Remote client stub that answers from a fixed script.
    struct ScriptedRemote {
        existing: Vec<String>,
    }

    impl RemoteFs for ScriptedRemote {
        fn is_connected(&self) -> bool {
            true
        }

        fn exists(&mut self, path: &str) -> BackendResult<bool> {
            Ok(self.existing.iter().any(|p| p == path))
        }

        fn create_file(&mut self, path: &str) -> BackendResult<bool> {
            if self.existing.iter().any(|p| p == path) {
                return Ok(false);
            }
            self.existing.push(path.to_string());
            Ok(true)
        }

        fn create_dir(&mut self, path: &str) -> BackendResult<bool> {
            self.create_file(path)
        }

        fn rename(&mut self, from: &str, to: &str) -> BackendResult<()> {
            let Some(slot) = self.existing.iter_mut().find(|p| *p == from) else {
                return Err(BackendError::NotFound(from.to_string()));
            };
            *slot = to.to_string();
            Ok(())
        }

        fn copy(&mut self, from: &str, to: &str) -> BackendResult<bool> {
            if !self.existing.iter().any(|p| p == from) {
                return Err(BackendError::NotFound(from.to_string()));
            }
            if self.existing.iter().any(|p| p == to) {
                return Ok(false);
            }
            self.existing.push(to.to_string());
            Ok(true)
        }
    }

    fn session(existing: &[&str]) -> SharedRemoteFs {
        Arc::new(Mutex::new(Box::new(ScriptedRemote {
            existing: existing.iter().map(|s| s.to_string()).collect(),
        }) as Box<dyn RemoteFs + Send>))
    }

    fn entry(session: SharedRemoteFs, path: &str, kind: EntryKind) -> RemoteEntry {
        RemoteEntry::new(session, "alice@dev".to_string(), path.to_string(), kind)
    }

    #[test]
    fn test_display_and_remote_path() {
        let e = entry(session(&[]), "/srv/www/index.html", EntryKind::File);
        assert_eq!(e.display_path(), "scp://alice@dev/srv/www/index.html");
        assert_eq!(e.remote_path(), "/srv/www/index.html");
    }

    #[test]
    fn test_parent_stays_on_same_session() {
        let e = entry(session(&[]), "/srv/www/index.html", EntryKind::File);
        let parent = e.parent().unwrap();
        assert_eq!(parent.remote_path(), "/srv/www");
        assert_eq!(parent.kind(), EntryKind::Directory);
        assert!(entry(e.session.clone(), "/", EntryKind::Directory)
            .parent()
            .is_none());
    }

    #[test]
    fn test_create_reports_collision() {
        let s = session(&["/srv/taken.txt"]);
        assert!(!entry(s.clone(), "/srv/taken.txt", EntryKind::File)
            .create()
            .unwrap());
        assert!(entry(s, "/srv/free.txt", EntryKind::File).create().unwrap());
    }

    #[test]
    fn test_copy_delegates_collision_to_client() {
        let s = session(&["/srv/a.txt", "/srv/b.txt"]);
        let e = entry(s, "/srv/a.txt", EntryKind::File);
        assert!(!e.copy_to("/srv/b.txt").unwrap());
        assert!(e.copy_to("/srv/c.txt").unwrap());
    }
}
