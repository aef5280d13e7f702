//! User settings for Casual Capture
//!
//! Manages the capture preferences: where the vault lives, how entries are
//! decorated, and the presentation options the popup window reads.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::CapturePaths;
use crate::error::CaptureError;

/// Hotkey restored by `capture hotkey reset`
pub const DEFAULT_HOTKEY: &str = "ctrl+alt+n";

/// Longest horizontal rule accepted, in characters
pub const MAX_HR_WIDTH: usize = 400;

/// Where the popup window appears on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppPosition {
    #[serde(rename = "top left")]
    TopLeft,
    #[serde(rename = "top right")]
    TopRight,
    #[serde(rename = "bottom left")]
    BottomLeft,
    #[serde(rename = "bottom right")]
    BottomRight,
    #[default]
    #[serde(rename = "center")]
    Center,
    #[serde(rename = "at mouse pointer")]
    AtMousePointer,
}

impl AppPosition {
    /// All positions, in the order the settings dialog lists them
    pub fn all() -> &'static [AppPosition] {
        &[
            Self::TopLeft,
            Self::TopRight,
            Self::BottomLeft,
            Self::BottomRight,
            Self::Center,
            Self::AtMousePointer,
        ]
    }

    /// Parse a position from its display name
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::all().iter().copied().find(|p| p.as_str() == needle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top left",
            Self::TopRight => "top right",
            Self::BottomLeft => "bottom left",
            Self::BottomRight => "bottom right",
            Self::Center => "center",
            Self::AtMousePointer => "at mouse pointer",
        }
    }
}

impl fmt::Display for AppPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User settings for Casual Capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Vault directory; relative paths are anchored to the working directory
    #[serde(default = "default_vault_dir")]
    pub vault_dir: PathBuf,

    /// Prefix each captured note with an `HH:MM:SS` line
    #[serde(default = "default_true")]
    pub insert_timestamps: bool,

    /// Extend the timestamp line with a horizontal rule
    #[serde(default)]
    pub add_horizontal_rule: bool,

    /// Character (or short pattern) repeated to draw the horizontal rule
    #[serde(default = "default_hr_char")]
    pub hr_char: String,

    /// Width of the horizontal rule, in characters
    #[serde(default = "default_hr_width")]
    pub hr_width: usize,

    #[serde(default)]
    pub dark_mode: bool,

    #[serde(default)]
    pub app_position: AppPosition,

    #[serde(default = "default_win_width")]
    pub win_width: u32,

    #[serde(default = "default_win_height")]
    pub win_height: u32,

    #[serde(default = "default_font_choice")]
    pub font_choice: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_true")]
    pub word_wrap: bool,

    /// Global hotkey that shows/hides the popup
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_vault_dir() -> PathBuf {
    PathBuf::from("CasualCapture")
}

fn default_true() -> bool {
    true
}

fn default_hr_char() -> String {
    "-".to_string()
}

fn default_hr_width() -> usize {
    80
}

fn default_win_width() -> u32 {
    500
}

fn default_win_height() -> u32 {
    400
}

fn default_font_choice() -> String {
    "courier".to_string()
}

fn default_font_size() -> u32 {
    11
}

fn default_hotkey() -> String {
    DEFAULT_HOTKEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            vault_dir: default_vault_dir(),
            insert_timestamps: true,
            add_horizontal_rule: false,
            hr_char: default_hr_char(),
            hr_width: default_hr_width(),
            dark_mode: false,
            app_position: AppPosition::default(),
            win_width: default_win_width(),
            win_height: default_win_height(),
            font_choice: default_font_choice(),
            font_size: default_font_size(),
            word_wrap: true,
            hotkey: default_hotkey(),
        }
    }
}

impl Settings {
    /// Render the fixed-width horizontal rule
    ///
    /// `hr_char` may be a short pattern such as `-=`; it is repeated and cut
    /// to exactly `hr_width` characters.
    pub fn horizontal_rule(&self) -> String {
        self.hr_char.chars().cycle().take(self.hr_width).collect()
    }

    /// Check the settings for values the capture core cannot work with
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.hr_char.is_empty() || self.hr_char.contains(['\n', '\r']) {
            return Err(CaptureError::Validation(format!(
                "Horizontal rule pattern must be non-empty and on one line, got {:?}",
                self.hr_char
            )));
        }
        if self.hr_width == 0 || self.hr_width > MAX_HR_WIDTH {
            return Err(CaptureError::Validation(format!(
                "Horizontal rule width must be between 1 and {}, got {}",
                MAX_HR_WIDTH, self.hr_width
            )));
        }
        if self.vault_dir.as_os_str().is_empty() {
            return Err(CaptureError::Validation("Vault directory cannot be empty".into()));
        }
        if self.font_size == 0 {
            return Err(CaptureError::Validation("Font size must be positive".into()));
        }
        if self.win_width == 0 || self.win_height == 0 {
            return Err(CaptureError::Validation(
                "Window dimensions must be positive".into(),
            ));
        }
        if self.hotkey.trim().is_empty() {
            return Err(CaptureError::Validation("Hotkey cannot be empty".into()));
        }
        Ok(())
    }

    /// Reset every field that fails validation to its default
    ///
    /// Returns the names of the fields that were reset. Used on settings read
    /// from disk, so a hand-edited file cannot lock out the commands that
    /// would repair it.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let defaults = Settings::default();
        let mut reset = Vec::new();

        if self.hr_char.is_empty() || self.hr_char.contains(['\n', '\r']) {
            self.hr_char = defaults.hr_char.clone();
            reset.push("hr_char");
        }
        if self.hr_width == 0 || self.hr_width > MAX_HR_WIDTH {
            self.hr_width = defaults.hr_width;
            reset.push("hr_width");
        }
        if self.vault_dir.as_os_str().is_empty() {
            self.vault_dir = defaults.vault_dir.clone();
            reset.push("vault_dir");
        }
        if self.font_size == 0 {
            self.font_size = defaults.font_size;
            reset.push("font_size");
        }
        if self.win_width == 0 || self.win_height == 0 {
            self.win_width = defaults.win_width;
            self.win_height = defaults.win_height;
            reset.push("win_width/win_height");
        }
        if self.hotkey.trim().is_empty() {
            self.hotkey = defaults.hotkey;
            reset.push("hotkey");
        }
        reset
    }

    /// `sanitize`, logging each reset field
    pub fn sanitized(mut self) -> Self {
        for setting in self.sanitize() {
            tracing::warn!(setting, "invalid setting replaced with its default");
        }
        self
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CapturePaths) -> Result<Self, CaptureError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CaptureError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CaptureError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CapturePaths) -> Result<(), CaptureError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CaptureError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            CaptureError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.insert_timestamps);
        assert!(!settings.add_horizontal_rule);
        assert_eq!(settings.vault_dir, PathBuf::from("CasualCapture"));
        assert_eq!(settings.hotkey, "ctrl+alt+n");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_horizontal_rule() {
        let settings = Settings {
            hr_char: "=".into(),
            hr_width: 5,
            ..Settings::default()
        };
        assert_eq!(settings.horizontal_rule(), "=====");
    }

    #[test]
    fn test_multi_char_rule_is_repeated_to_width() {
        let settings = Settings {
            hr_char: "-=".into(),
            hr_width: 5,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.horizontal_rule(), "-=-=-");
    }

    #[test]
    fn test_validate_rejects_empty_or_multiline_rule() {
        for pattern in ["", "-\n-"] {
            let settings = Settings {
                hr_char: pattern.into(),
                ..Settings::default()
            };
            assert!(settings.validate().unwrap_err().is_validation());
        }
    }

    #[test]
    fn test_sanitize_resets_only_invalid_fields() {
        let mut settings = Settings {
            hr_char: String::new(),
            hr_width: 0,
            font_size: 0,
            dark_mode: true,
            ..Settings::default()
        };

        let reset = settings.sanitize();

        assert_eq!(reset, vec!["hr_char", "hr_width", "font_size"]);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.hr_char, "-");
        assert!(settings.dark_mode);
        assert!(Settings::default().sanitize().is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_width_rule() {
        let settings = Settings {
            hr_width: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CapturePaths::with_config_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            add_horizontal_rule: true,
            app_position: AppPosition::BottomRight,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_loads_legacy_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CapturePaths::with_config_dir(temp_dir.path().to_path_buf());
        let legacy = r#"{"dark_mode": true, "insert_timestamps": false,
            "add_horizontal_rule": true, "app_position": "at mouse pointer",
            "win_width": 600, "win_height": 300, "font_choice": "mono",
            "font_size": 12, "hr_char": "~", "hotkey": "ctrl+alt+j",
            "word_wrap": false}"#;
        std::fs::write(paths.settings_file(), legacy).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.dark_mode);
        assert!(!loaded.insert_timestamps);
        assert_eq!(loaded.app_position, AppPosition::AtMousePointer);
        assert_eq!(loaded.hr_char, "~");
        assert_eq!(loaded.hr_width, 80);
        assert_eq!(loaded.vault_dir, PathBuf::from("CasualCapture"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CapturePaths::with_config_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_app_position_parse() {
        assert_eq!(AppPosition::parse("Top-Left"), Some(AppPosition::TopLeft));
        assert_eq!(
            AppPosition::parse("at_mouse_pointer"),
            Some(AppPosition::AtMousePointer)
        );
        assert_eq!(AppPosition::parse("middle"), None);
    }
}
