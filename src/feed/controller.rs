//! Feed toggle state machine
//!
//! ```text
//!            capture (decorate + append)
//!              ┌──────┐
//!              ▼      │
//!           ┌────────────┐   toggle (load)    ┌─────────────────┐
//!  start ──►│   Append   │ ─────────────────► │ WholeFeedLoaded │
//!           └────────────┘ ◄───────────────── └─────────────────┘
//!                          toggle / capture
//!                          (overwrite, clear)
//! ```
//!
//! Every transition that touches the disk happens before the state or the
//! buffer changes, so a failed write leaves both exactly as they were.

use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;

use super::buffer::NoteBuffer;
use super::decorate::decorate_entry;
use crate::config::Settings;
use crate::error::{CaptureError, CaptureResult};
use crate::storage::{journal, AssetReference, AssetStore};

/// Whether the buffer holds a pending note or the whole daily file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedState {
    #[default]
    Append,
    WholeFeedLoaded,
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::WholeFeedLoaded => write!(f, "whole feed loaded"),
        }
    }
}

/// Outcome of a feed toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedToggle {
    /// True when the feed is now loaded into the buffer
    pub loaded: bool,
    /// The loaded feed; `None` after flushing it back
    pub content: Option<String>,
}

/// What a capture action wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A decorated entry was appended
    Appended(String),
    /// The loaded feed was written back over the daily file
    FeedFlushed,
    /// Nothing was pending; the daily file was only created if missing
    Empty,
}

/// Decides append vs. overwrite for each capture and feed action
#[derive(Debug, Default)]
pub struct FeedController {
    state: FeedState,
}

impl FeedController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn is_feed_loaded(&self) -> bool {
        self.state == FeedState::WholeFeedLoaded
    }

    /// The "show feed" action
    ///
    /// From `Append`, loads `path` into the (blank) buffer without touching
    /// the file. From `WholeFeedLoaded`, overwrites `path` with the buffer and
    /// clears it.
    pub fn toggle_feed<B: NoteBuffer + ?Sized>(
        &mut self,
        path: &Path,
        buffer: &mut B,
    ) -> CaptureResult<FeedToggle> {
        match self.state {
            FeedState::Append => {
                if !buffer.is_blank() {
                    return Err(CaptureError::Validation(
                        "Capture or clear the pending note before opening the feed".into(),
                    ));
                }
                let content = journal::load(path)?;
                buffer.clear();
                buffer.insert_at_cursor(&content);
                self.state = FeedState::WholeFeedLoaded;
                tracing::info!(path = %path.display(), bytes = content.len(), "feed loaded");
                Ok(FeedToggle {
                    loaded: true,
                    content: Some(content),
                })
            }
            FeedState::WholeFeedLoaded => {
                self.flush_feed(path, buffer)?;
                Ok(FeedToggle {
                    loaded: false,
                    content: None,
                })
            }
        }
    }

    /// The hide/capture action
    ///
    /// In `Append`, decorates the pending note and appends it. With the feed
    /// loaded, the buffer is the whole file, so it is written back undecorated
    /// and the controller returns to `Append`.
    pub fn capture<B: NoteBuffer + ?Sized>(
        &mut self,
        path: &Path,
        buffer: &mut B,
        settings: &Settings,
        now: NaiveDateTime,
    ) -> CaptureResult<CaptureOutcome> {
        if self.is_feed_loaded() {
            self.flush_feed(path, buffer)?;
            return Ok(CaptureOutcome::FeedFlushed);
        }

        if buffer.is_blank() {
            journal::ensure_file(path)?;
            buffer.clear();
            return Ok(CaptureOutcome::Empty);
        }

        let entry = decorate_entry(&buffer.current_text(), settings, now);
        journal::append(path, &entry)?;
        buffer.clear();
        tracing::info!(path = %path.display(), bytes = entry.len(), "note captured");
        Ok(CaptureOutcome::Appended(entry))
    }

    /// Insert a horizontal rule line at the cursor
    pub fn insert_rule<B: NoteBuffer + ?Sized>(&self, buffer: &mut B, settings: &Settings) {
        buffer.insert_at_cursor(&format!("{}\n", settings.horizontal_rule()));
    }

    /// Store pasted image bytes and insert their reference token at the cursor
    ///
    /// The token is followed by a newline so typing continues under the image.
    pub fn paste_image<B: NoteBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        assets: &AssetStore,
        bytes: &[u8],
        now: NaiveDateTime,
    ) -> CaptureResult<AssetReference> {
        let reference = assets.save_image(bytes, now)?;
        buffer.insert_at_cursor(&format!("{}\n", reference.token()));
        Ok(reference)
    }

    fn flush_feed<B: NoteBuffer + ?Sized>(&mut self, path: &Path, buffer: &mut B) -> CaptureResult<()> {
        let text = buffer.current_text();
        journal::overwrite(path, &text)?;
        buffer.clear();
        self.state = FeedState::Append;
        tracing::info!(path = %path.display(), bytes = text.len(), "feed written back");
        Ok(())
    }
}
