//! Local filesystem entries

use std::fs;
use std::path::{Path, PathBuf};

use super::{BackendResult, EntryKind};

/// One entry on the local disk.
#[derive(Debug, Clone)]
pub struct LocalEntry {
    path: PathBuf,
    kind: EntryKind,
}

impl LocalEntry {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        Self { path, kind }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn parent(&self) -> Option<LocalEntry> {
        let parent = self.path.parent()?;
        Some(LocalEntry::new(parent.to_path_buf(), EntryKind::Directory))
    }

    pub fn child(&self, name: &str, kind: EntryKind) -> LocalEntry {
        LocalEntry::new(self.path.join(name), kind)
    }

    pub fn exists(&self) -> BackendResult<bool> {
        Ok(self.path.exists())
    }

    /// Create the file or directory. A pre-existing entry at the path is
    /// reported as `Ok(false)`, not an error.
    pub fn create(&self) -> BackendResult<bool> {
        let result = match self.kind {
            EntryKind::Directory => fs::create_dir(&self.path),
            EntryKind::File => fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.path)
                .map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn rename(&self, new_path: &str) -> BackendResult<()> {
        fs::rename(&self.path, new_path)?;
        Ok(())
    }

    /// Copy the entry (recursively for directories), preserving attributes.
    /// An occupied destination is refused and reported as `Ok(false)`.
    pub fn copy_to(&self, new_path: &str) -> BackendResult<bool> {
        let dest = Path::new(new_path);
        if dest.exists() {
            return Ok(false);
        }
        copy_path(&self.path, dest)?;
        Ok(true)
    }
}

/// Copy a file or directory recursively, preserving attributes.
fn copy_path(src: &Path, dest: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        copy_dir_recursive(src, dest)
    } else {
        fs::copy(src, dest)?;
        preserve_attributes(src, dest);
        Ok(())
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
            preserve_attributes(&src_path, &dest_path);
        }
    }

    // Directory attributes last, so the mtime isn't clobbered by creating
    // children.
    preserve_attributes(src, dest);

    Ok(())
}

/// Carry permissions and modification time from src to dest. Best-effort;
/// the file data is already in place when this runs.
fn preserve_attributes(src: &Path, dest: &Path) {
    if let Ok(meta) = fs::metadata(src) {
        if let Ok(mtime) = meta.modified() {
            let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
        }
        #[cfg(unix)]
        {
            let _ = fs::set_permissions(dest, meta.permissions());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_entry(path: &Path) -> LocalEntry {
        LocalEntry::new(path.to_path_buf(), EntryKind::File)
    }

    fn dir_entry(path: &Path) -> LocalEntry {
        LocalEntry::new(path.to_path_buf(), EntryKind::Directory)
    }

    #[test]
    fn test_create_file_and_collision() {
        let tmp = tempfile::tempdir().unwrap();
        let entry = file_entry(&tmp.path().join("notes.md"));

        assert!(entry.create().unwrap());
        assert!(entry.exists().unwrap());
        // Second create is a collision, not an error
        assert!(!entry.create().unwrap());
    }

    #[test]
    fn test_create_dir_and_collision() {
        let tmp = tempfile::tempdir().unwrap();
        let entry = dir_entry(&tmp.path().join("sub"));

        assert!(entry.create().unwrap());
        assert!(!entry.create().unwrap());
    }

    #[test]
    fn test_rename_moves_the_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let old = tmp.path().join("old.txt");
        fs::write(&old, b"body").unwrap();

        let new = tmp.path().join("new.txt");
        file_entry(&old).rename(new.to_str().unwrap()).unwrap();

        assert!(!old.exists());
        assert_eq!(fs::read(&new).unwrap(), b"body");
    }

    #[test]
    fn test_copy_refuses_occupied_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.txt");
        let dest = tmp.path().join("b.txt");
        fs::write(&src, b"src").unwrap();
        fs::write(&dest, b"dest").unwrap();

        assert!(!file_entry(&src).copy_to(dest.to_str().unwrap()).unwrap());
        // Destination untouched
        assert_eq!(fs::read(&dest).unwrap(), b"dest");
    }

    #[test]
    fn test_copy_directory_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("dir");
        fs::create_dir(&src).unwrap();
        fs::create_dir(src.join("nested")).unwrap();
        fs::write(src.join("nested/deep.txt"), b"deep").unwrap();
        fs::write(src.join("top.txt"), b"top").unwrap();

        let dest = tmp.path().join("dir-copy");
        assert!(dir_entry(&src).copy_to(dest.to_str().unwrap()).unwrap());

        assert_eq!(fs::read(dest.join("top.txt")).unwrap(), b"top");
        assert_eq!(fs::read(dest.join("nested/deep.txt")).unwrap(), b"deep");
    }

    #[test]
    fn test_child_and_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = dir_entry(tmp.path());
        let child = dir.child("notes.md", EntryKind::File);
        assert_eq!(
            child.path_string(),
            tmp.path().join("notes.md").to_string_lossy()
        );
        assert_eq!(
            child.parent().unwrap().path_string(),
            tmp.path().to_string_lossy()
        );
    }
}
