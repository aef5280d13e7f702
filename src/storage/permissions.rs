//! Permission normalization for vault entries
//!
//! The capturing process may run elevated (global hotkey listeners often
//! need to) while the viewing process runs as the normal user. Everything the
//! core creates is therefore opened up to all local users. Failures are logged
//! and swallowed; they never fail a capture.

use std::path::Path;

use crate::error::CaptureResult;

/// Mode applied to created directories: rwx for owner, group and other
pub const DIR_MODE: u32 = 0o777;

/// Mode applied to created files: rw for owner, group and other
pub const FILE_MODE: u32 = 0o666;

/// What kind of filesystem entry is being normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn mode(self) -> u32 {
        match self {
            Self::Directory => DIR_MODE,
            Self::File => FILE_MODE,
        }
    }
}

/// Apply the all-access mode for `kind` to `path`, logging any failure
pub fn normalize(path: &Path, kind: EntryKind) {
    if let Err(e) = try_normalize(path, kind) {
        tracing::warn!(error = %e, "continuing without normalized permissions");
    }
}

/// Apply the all-access mode for `kind` to `path`
///
/// Always succeeds on platforms without POSIX mode bits.
#[cfg(unix)]
pub fn try_normalize(path: &Path, kind: EntryKind) -> CaptureResult<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(kind.mode())).map_err(|e| {
        crate::error::CaptureError::PermissionNormalization {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    tracing::debug!(path = %path.display(), "normalized permissions to {:o}", kind.mode());
    Ok(())
}

/// Apply the all-access mode for `kind` to `path`
///
/// Always succeeds on platforms without POSIX mode bits.
#[cfg(not(unix))]
pub fn try_normalize(_path: &Path, _kind: EntryKind) -> CaptureResult<()> {
    Ok(())
}
