//! Daily journal files
//!
//! One plain UTF-8 text file per calendar day, named `YYYY-MM-DD.txt`, living
//! directly in the vault root. Entries are appended verbatim; the whole file
//! is only ever rewritten when a loaded feed is flushed back.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use super::permissions::{self, EntryKind};
use super::resolve;
use crate::error::{CaptureError, CaptureResult};

/// Extension of daily journal files
pub const JOURNAL_EXTENSION: &str = "txt";

/// Filename of the journal file for the day of `now`
pub fn daily_filename(now: NaiveDateTime) -> String {
    filename_for_date(now.date())
}

/// Filename of the journal file for `date`
pub fn filename_for_date(date: NaiveDate) -> String {
    format!("{}.{}", date.format("%Y-%m-%d"), JOURNAL_EXTENSION)
}

/// Create `path` as an empty file if it does not exist yet
///
/// Never truncates an existing file. A newly created file gets the all-access
/// file mode.
pub fn ensure_file(path: &Path) -> CaptureResult<()> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            tracing::debug!(path = %path.display(), "created journal file");
            permissions::normalize(path, EntryKind::File);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(CaptureError::write(path, e)),
    }
}

/// Append `text` verbatim to the end of `path`
///
/// No newline is added. An empty `text` leaves the file untouched apart from
/// creating it when missing.
pub fn append(path: &Path, text: &str) -> CaptureResult<()> {
    ensure_file(path)?;
    if text.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| CaptureError::write(path, e))?;

    file.write_all(text.as_bytes())
        .map_err(|e| CaptureError::write(path, e))?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "appended entry");
    Ok(())
}

/// Replace the entire contents of `path` with `text`
pub fn overwrite(path: &Path, text: &str) -> CaptureResult<()> {
    ensure_file(path)?;

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| CaptureError::write(path, e))?;

    file.write_all(text.as_bytes())
        .map_err(|e| CaptureError::write(path, e))?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "overwrote journal file");
    Ok(())
}

/// Read the full contents of `path` as UTF-8 text
pub fn load(path: &Path) -> CaptureResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| CaptureError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    String::from_utf8(bytes).map_err(|e| CaptureError::decode(path, e.utf8_error()))
}

/// Daily journal files of one vault
#[derive(Debug, Clone)]
pub struct Journal {
    root: PathBuf,
}

impl Journal {
    /// Create a journal rooted at `root`; nothing is created until first use
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the journal file for `date`, for lookups only
    ///
    /// Unlike `daily_path`, nothing is created on disk.
    pub fn path_for_date(&self, date: NaiveDate) -> PathBuf {
        self.root.join(filename_for_date(date))
    }

    /// Absolute path of today's journal file, creating the vault root
    pub fn daily_path(&self, now: NaiveDateTime) -> CaptureResult<PathBuf> {
        resolve::resolve(&self.root, &daily_filename(now))
    }

    /// Resolve today's file and make sure it exists
    pub fn ensure_today(&self, now: NaiveDateTime) -> CaptureResult<PathBuf> {
        let path = self.daily_path(now)?;
        ensure_file(&path)?;
        Ok(path)
    }

    /// Dates that have a journal file in the vault, oldest first
    pub fn list_dates(&self) -> CaptureResult<Vec<NaiveDate>> {
        let root = resolve::absolutize(&self.root)?;
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        for entry in std::fs::read_dir(&root).map_err(|e| {
            CaptureError::Io(format!("Failed to read vault directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| CaptureError::Io(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != JOURNAL_EXTENSION) {
                continue;
            }
            let date = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
            if let Some(date) = date {
                dates.push(date);
            }
        }

        dates.sort();
        Ok(dates)
    }
}
