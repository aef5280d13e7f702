//! Path management for Casual Capture
//!
//! Resolves where the settings file lives. The journal vault itself is
//! configured in the settings (see `Settings::vault_dir`).
//!
//! ## Path Resolution Order
//!
//! 1. `CASUAL_CAPTURE_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/casual-capture` or `~/.config/casual-capture`
//! 3. Windows: `%APPDATA%\casual-capture`

use std::path::PathBuf;

use crate::error::CaptureError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "CASUAL_CAPTURE_CONFIG_DIR";

/// Manages the configuration paths used by Casual Capture
#[derive(Debug, Clone)]
pub struct CapturePaths {
    /// Directory holding the settings file
    config_dir: PathBuf,
}

impl CapturePaths {
    /// Create a new CapturePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home/appdata directory
    /// can be determined.
    pub fn new() -> Result<Self, CaptureError> {
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { config_dir })
    }

    /// Create CapturePaths with a custom config directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory (~/.config/casual-capture/ or equivalent)
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), CaptureError> {
        std::fs::create_dir_all(&self.config_dir).map_err(|e| {
            CaptureError::Io(format!("Failed to create config directory: {}", e))
        })
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CaptureError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("casual-capture"));
        }
    }
    let home = std::env::var("HOME")
        .map_err(|_| CaptureError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("casual-capture"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CaptureError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CaptureError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("casual-capture"))
}
