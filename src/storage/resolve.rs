//! Vault path resolution
//!
//! Turns a logical root (relative or absolute) plus a filename into an
//! absolute path, creating the root and any missing parents on the way.

use std::path::{Path, PathBuf};

use super::permissions::{self, EntryKind};
use crate::error::{CaptureError, CaptureResult};

/// Anchor `root` to the current working directory when it is relative
pub fn absolutize(root: &Path) -> CaptureResult<PathBuf> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| CaptureError::directory_creation(root, e))?;
    Ok(cwd.join(root))
}

/// Make sure `root` exists as a directory and return its absolute form
///
/// Every directory this call creates gets the all-access directory mode.
/// Calling it on an existing directory only checks that it is one.
pub fn ensure_dir(root: &Path) -> CaptureResult<PathBuf> {
    let root = absolutize(root)?;

    if root.is_dir() {
        return Ok(root);
    }
    if root.exists() {
        return Err(CaptureError::directory_creation(
            &root,
            "path exists and is not a directory",
        ));
    }

    // Remember which ancestors are missing so only those get normalized
    let missing: Vec<PathBuf> = root
        .ancestors()
        .take_while(|p| !p.exists())
        .map(Path::to_path_buf)
        .collect();

    std::fs::create_dir_all(&root).map_err(|e| CaptureError::directory_creation(&root, e))?;
    tracing::debug!(path = %root.display(), created = missing.len(), "created vault directory");

    for dir in missing.iter().rev() {
        permissions::normalize(dir, EntryKind::Directory);
    }

    Ok(root)
}

/// Resolve `name` inside `root`, creating `root` if needed
pub fn resolve(root: &Path, name: &str) -> CaptureResult<PathBuf> {
    Ok(ensure_dir(root)?.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_creates_nested_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("a").join("b").join("vault");

        let path = resolve(&root, "2024-03-07.txt").unwrap();

        assert!(root.is_dir());
        assert_eq!(path, root.join("2024-03-07.txt"));
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("vault");

        let first = resolve(&root, "x.txt").unwrap();
        std::fs::write(root.join("keep.txt"), "data").unwrap();
        let second = resolve(&root, "x.txt").unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(root.join("keep.txt")).unwrap(), "data");
    }

    #[test]
    fn test_resolve_rejects_file_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("not-a-dir");
        std::fs::write(&root, "").unwrap();

        let err = resolve(&root, "x.txt").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_absolutize_keeps_absolute_paths() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(absolutize(temp_dir.path()).unwrap(), temp_dir.path());
    }

    #[test]
    fn test_absolutize_anchors_relative_paths() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            absolutize(Path::new("CasualCapture")).unwrap(),
            cwd.join("CasualCapture")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_created_directories_open_to_all() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("parent");
        let root = parent.join("vault");
        ensure_dir(&root).unwrap();

        for dir in [&parent, &root] {
            let mode = std::fs::metadata(dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o777);
        }
        // The pre-existing temp dir is left alone
        let mode = std::fs::metadata(temp_dir.path()).unwrap().permissions().mode() & 0o777;
        assert_ne!(mode, 0o777);
    }
}
