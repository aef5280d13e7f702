//! Configuration module for Casual Capture
//!
//! This module provides configuration management including:
//! - XDG-compliant config path resolution
//! - User settings persistence
//! - Snapshot/draft/commit handling of live settings

pub mod live;
pub mod paths;
pub mod settings;

pub use live::{LiveSettings, SettingsDraft};
pub use paths::CapturePaths;
pub use settings::Settings;
