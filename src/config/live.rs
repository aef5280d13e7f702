//! Live settings with staged edits
//!
//! Components never share a mutable `Settings`. They take an `Arc<Settings>`
//! snapshot per action. Edits are staged on a `SettingsDraft` and replace the
//! live snapshot in one assignment on commit.

use std::path::PathBuf;
use std::sync::Arc;

use super::settings::{AppPosition, Settings, DEFAULT_HOTKEY};
use crate::error::{CaptureError, CaptureResult};

/// Setting keys accepted by `SettingsDraft::set`
pub const SETTING_KEYS: &[&str] = &[
    "vault_dir",
    "insert_timestamps",
    "add_horizontal_rule",
    "hr_char",
    "hr_width",
    "dark_mode",
    "app_position",
    "win_width",
    "win_height",
    "font_choice",
    "font_size",
    "word_wrap",
    "hotkey",
];

/// Holder of the currently committed settings
#[derive(Debug, Clone)]
pub struct LiveSettings {
    current: Arc<Settings>,
}

impl LiveSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: Arc::new(settings),
        }
    }

    /// Immutable view of the committed settings
    pub fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.current)
    }

    /// Start staging edits from the committed settings
    pub fn draft(&self) -> SettingsDraft {
        SettingsDraft {
            staged: (*self.current).clone(),
        }
    }

    /// Validate a draft and make it the live settings
    ///
    /// On validation failure the live settings are left untouched.
    pub fn commit(&mut self, draft: SettingsDraft) -> CaptureResult<Arc<Settings>> {
        draft.staged.validate()?;
        self.current = Arc::new(draft.staged);
        tracing::debug!("settings committed");
        Ok(self.snapshot())
    }
}

/// A private copy of the settings that can be edited freely
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    staged: Settings,
}

impl SettingsDraft {
    pub fn staged(&self) -> &Settings {
        &self.staged
    }

    /// Restore the default popup hotkey
    pub fn reset_hotkey(&mut self) {
        self.staged.hotkey = DEFAULT_HOTKEY.to_string();
    }

    /// Set a single setting from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> CaptureResult<()> {
        let s = &mut self.staged;
        match key {
            "vault_dir" => s.vault_dir = PathBuf::from(value),
            "insert_timestamps" => s.insert_timestamps = parse_bool(key, value)?,
            "add_horizontal_rule" => s.add_horizontal_rule = parse_bool(key, value)?,
            "hr_char" => s.hr_char = value.to_string(),
            "hr_width" => s.hr_width = parse_number(key, value)?,
            "dark_mode" => s.dark_mode = parse_bool(key, value)?,
            "app_position" => {
                s.app_position = AppPosition::parse(value).ok_or_else(|| {
                    let valid: Vec<_> = AppPosition::all().iter().map(|p| p.as_str()).collect();
                    CaptureError::Validation(format!(
                        "Invalid app position: '{}'. Valid positions: {}",
                        value,
                        valid.join(", ")
                    ))
                })?
            }
            "win_width" => s.win_width = parse_number(key, value)?,
            "win_height" => s.win_height = parse_number(key, value)?,
            "font_choice" => s.font_choice = value.to_string(),
            "font_size" => s.font_size = parse_number(key, value)?,
            "word_wrap" => s.word_wrap = parse_bool(key, value)?,
            "hotkey" => s.hotkey = value.trim().to_string(),
            _ => {
                return Err(CaptureError::Validation(format!(
                    "Unknown setting: '{}'. Valid settings: {}",
                    key,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> CaptureResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CaptureError::Validation(format!(
            "Invalid value for {}: '{}'. Expected true or false",
            key, value
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> CaptureResult<T> {
    value.trim().parse().map_err(|_| {
        CaptureError::Validation(format!(
            "Invalid value for {}: '{}'. Expected a number",
            key, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_unaffected_by_draft() {
        let live = LiveSettings::new(Settings::default());
        let before = live.snapshot();

        let mut draft = live.draft();
        draft.set("insert_timestamps", "false").unwrap();

        assert!(before.insert_timestamps);
        assert!(live.snapshot().insert_timestamps);
        assert!(!draft.staged().insert_timestamps);
    }

    #[test]
    fn test_commit_replaces_snapshot() {
        let mut live = LiveSettings::new(Settings::default());
        let old = live.snapshot();

        let mut draft = live.draft();
        draft.set("hr_char", "=").unwrap();
        draft.set("add_horizontal_rule", "yes").unwrap();
        let committed = live.commit(draft).unwrap();

        assert_eq!(committed.hr_char, "=");
        assert!(live.snapshot().add_horizontal_rule);
        // Earlier snapshots keep observing the old values
        assert_eq!(old.hr_char, "-");
    }

    #[test]
    fn test_invalid_commit_keeps_live_settings() {
        let mut live = LiveSettings::new(Settings::default());

        let mut draft = live.draft();
        draft.set("hr_char", "").unwrap();
        assert!(live.commit(draft).is_err());

        assert_eq!(live.snapshot().hr_char, "-");
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_values() {
        let mut draft = LiveSettings::new(Settings::default()).draft();
        assert!(draft.set("colour", "blue").is_err());
        assert!(draft.set("font_size", "big").is_err());
        assert!(draft.set("dark_mode", "maybe").is_err());
        assert!(draft.set("app_position", "middle").is_err());
    }

    #[test]
    fn test_reset_hotkey() {
        let mut draft = LiveSettings::new(Settings::default()).draft();
        draft.set("hotkey", "ctrl+shift+j").unwrap();
        draft.reset_hotkey();
        assert_eq!(draft.staged().hotkey, DEFAULT_HOTKEY);
    }
}
