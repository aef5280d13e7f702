//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the capture core.

pub mod config;
pub mod feed;
pub mod note;
pub mod refs;

pub use config::{handle_config_command, handle_hotkey_command, ConfigCommands, HotkeyCommands};
pub use feed::{handle_feed_command, FeedCommands};
pub use note::{handle_attach_command, handle_note_command, handle_today_command};
pub use refs::{handle_days_command, handle_refs_command};
