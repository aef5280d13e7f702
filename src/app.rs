//! Application context
//!
//! `CaptureApp` wires the vault, the feed controller, the pending note buffer
//! and the live settings together, and is the surface the UI layer calls:
//! `ensure_today_ready`, `capture_append`, `toggle_feed`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::{LiveSettings, Settings, SettingsDraft};
use crate::error::CaptureResult;
use crate::feed::{CaptureOutcome, FeedController, FeedState, NoteBuffer, TextBuffer};
use crate::storage::{parse_references, AssetReference, TokenMatch, Vault};
use crate::trigger::CaptureTrigger;

/// One capture session over a single vault
pub struct CaptureApp<C: Clock = SystemClock> {
    vault: Vault,
    settings: LiveSettings,
    feed: FeedController,
    buffer: TextBuffer,
    /// Daily file the loaded feed came from, so it is written back there
    /// even if the date rolls over while editing
    loaded_path: Option<PathBuf>,
    clock: C,
    trigger: Option<Box<dyn CaptureTrigger>>,
}

impl CaptureApp<SystemClock> {
    /// Open a session on the vault at `vault_root` using the system clock
    pub fn new(vault_root: &Path, settings: Settings) -> CaptureResult<Self> {
        Self::with_clock(vault_root, settings, SystemClock)
    }
}

impl<C: Clock> CaptureApp<C> {
    /// Open a session with an explicit clock
    ///
    /// Invalid settings fields fall back to their defaults with a warning.
    pub fn with_clock(vault_root: &Path, settings: Settings, clock: C) -> CaptureResult<Self> {
        Ok(Self {
            vault: Vault::new(vault_root)?,
            settings: LiveSettings::new(settings.sanitized()),
            feed: FeedController::new(),
            buffer: TextBuffer::new(),
            loaded_path: None,
            clock,
            trigger: None,
        })
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Snapshot of the committed settings
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.snapshot()
    }

    /// Start staging a settings change
    pub fn draft_settings(&self) -> SettingsDraft {
        self.settings.draft()
    }

    /// Commit staged settings, re-registering the trigger if the hotkey moved
    ///
    /// If the trigger rejects the new hotkey, the previous settings and
    /// binding are restored and the error is returned.
    pub fn commit_settings(&mut self, draft: SettingsDraft) -> CaptureResult<Arc<Settings>> {
        let previous = self.settings.clone();
        let committed = self.settings.commit(draft)?;
        let old_hotkey = previous.snapshot().hotkey.clone();

        if committed.hotkey != old_hotkey {
            if let Some(trigger) = self.trigger.as_mut() {
                trigger.unregister();
                if let Err(e) = trigger.register(&committed.hotkey) {
                    if let Err(restore) = trigger.register(&old_hotkey) {
                        tracing::warn!(error = %restore, "could not restore previous hotkey");
                    }
                    self.settings = previous;
                    return Err(e);
                }
                tracing::info!(trigger = %trigger.describe(), "trigger re-registered");
            }
        }
        Ok(committed)
    }

    /// Register `trigger` as the single capture trigger, replacing any other
    pub fn install_trigger(&mut self, mut trigger: Box<dyn CaptureTrigger>) -> CaptureResult<()> {
        self.shutdown();
        trigger.register(&self.settings.snapshot().hotkey)?;
        tracing::debug!(trigger = %trigger.describe(), "trigger registered");
        self.trigger = Some(trigger);
        Ok(())
    }

    /// Unregister the capture trigger, if any
    pub fn shutdown(&mut self) {
        if let Some(mut trigger) = self.trigger.take() {
            trigger.unregister();
            tracing::debug!(trigger = %trigger.describe(), "trigger unregistered");
        }
    }

    pub fn has_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn feed_state(&self) -> FeedState {
        self.feed.state()
    }

    /// The pending note buffer
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Make sure the vault and today's file exist and return the file's path
    pub fn ensure_today_ready(&self) -> CaptureResult<PathBuf> {
        self.vault.journal.ensure_today(self.clock.now())
    }

    /// Capture `text` together with whatever the buffer already holds
    ///
    /// The capture runs on a copy of the buffer, which replaces the buffer
    /// only on success. A failed call changes nothing, so repeating it writes
    /// the text once.
    pub fn capture_append(&mut self, text: &str) -> CaptureResult<CaptureOutcome> {
        let mut staged = self.buffer.clone();
        staged.insert_at_cursor(text);
        let outcome = self.capture_buffer(&mut staged)?;
        self.buffer = staged;
        Ok(outcome)
    }

    /// Run the capture action on whatever the buffer holds
    ///
    /// On failure the buffer keeps its text.
    pub fn capture(&mut self) -> CaptureResult<CaptureOutcome> {
        let mut buffer = std::mem::take(&mut self.buffer);
        let result = self.capture_buffer(&mut buffer);
        self.buffer = buffer;
        result
    }

    fn capture_buffer(&mut self, buffer: &mut TextBuffer) -> CaptureResult<CaptureOutcome> {
        let settings = self.settings.snapshot();
        let now = self.clock.now();
        let path = self.target_path()?;

        let outcome = self.feed.capture(&path, buffer, &settings, now)?;
        if !self.feed.is_feed_loaded() {
            self.loaded_path = None;
        }
        Ok(outcome)
    }

    /// The "show feed" action: `(is_now_loaded, loaded_content)`
    pub fn toggle_feed(&mut self) -> CaptureResult<(bool, Option<String>)> {
        let path = self.target_path()?;
        if !self.feed.is_feed_loaded() {
            crate::storage::journal::ensure_file(&path)?;
        }

        let toggle = self.feed.toggle_feed(&path, &mut self.buffer)?;
        self.loaded_path = toggle.loaded.then_some(path);
        Ok((toggle.loaded, toggle.content))
    }

    /// Store pasted image bytes and put their token in the buffer
    pub fn paste_image(&mut self, bytes: &[u8]) -> CaptureResult<AssetReference> {
        let now = self.clock.now();
        self.feed
            .paste_image(&mut self.buffer, &self.vault.assets, bytes, now)
    }

    /// Insert a horizontal rule at the buffer cursor
    pub fn insert_rule(&mut self) {
        let settings = self.settings.snapshot();
        self.feed.insert_rule(&mut self.buffer, &settings);
    }

    /// Reference tokens in `text`, for rendering images inline
    pub fn references(&self, text: &str) -> Vec<TokenMatch> {
        parse_references(text)
    }

    fn target_path(&self) -> CaptureResult<PathBuf> {
        match &self.loaded_path {
            Some(path) if self.feed.is_feed_loaded() => Ok(path.clone()),
            _ => self.vault.journal.daily_path(self.clock.now()),
        }
    }
}

impl<C: Clock> Drop for CaptureApp<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
