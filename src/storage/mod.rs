//! Storage layer for Casual Capture
//!
//! Plain-file storage for the vault: daily journal files, pasted image
//! assets, on-demand directory creation and permission normalization.

pub mod assets;
pub mod journal;
pub mod permissions;
pub mod resolve;

pub use assets::{parse_references, AssetReference, AssetStore, TokenMatch};
pub use journal::{daily_filename, Journal};

use std::path::{Path, PathBuf};

use crate::error::CaptureResult;

/// Main storage coordinator for one vault
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    pub journal: Journal,
    pub assets: AssetStore,
}

impl Vault {
    /// Open the vault at `root`, anchoring a relative root to the working
    /// directory. Nothing is created until the first write.
    pub fn new(root: &Path) -> CaptureResult<Self> {
        let root = resolve::absolutize(root)?;
        Ok(Self {
            journal: Journal::new(root.clone()),
            assets: AssetStore::for_vault(&root),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the vault directory if needed
    pub fn ensure_root(&self) -> CaptureResult<()> {
        resolve::ensure_dir(&self.root).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vault_layout() {
        let temp_dir = TempDir::new().unwrap();
        let vault = Vault::new(&temp_dir.path().join("CasualCapture")).unwrap();

        assert_eq!(vault.root(), temp_dir.path().join("CasualCapture"));
        assert_eq!(vault.journal.root(), vault.root());
        assert_eq!(vault.assets.dir(), vault.root().join("assets"));
        assert!(!vault.root().exists());

        vault.ensure_root().unwrap();
        assert!(vault.root().is_dir());
    }
}
