//! Settings CLI commands
//!
//! Every change is staged on a draft, validated on commit, then persisted.

use clap::Subcommand;

use crate::app::CaptureApp;
use crate::clock::Clock;
use crate::config::{CapturePaths, SettingsDraft};
use crate::display::format_settings;
use crate::error::CaptureResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings and paths
    Show,
    /// Change a setting
    Set {
        /// Setting name (e.g. insert_timestamps, hr_char, vault_dir)
        key: String,
        /// New value
        value: String,
    },
}

/// Hotkey subcommands
#[derive(Subcommand)]
pub enum HotkeyCommands {
    /// Restore the default popup hotkey
    Reset,
}

/// Handle a config command
pub fn handle_config_command<C: Clock>(
    app: &mut CaptureApp<C>,
    paths: &CapturePaths,
    cmd: ConfigCommands,
) -> CaptureResult<()> {
    match cmd {
        ConfigCommands::Show => {
            print!(
                "{}",
                format_settings(&app.settings(), &paths.settings_file(), app.vault().root())
            );
        }

        ConfigCommands::Set { key, value } => {
            let mut draft = app.draft_settings();
            draft.set(&key, &value)?;
            commit_and_save(app, paths, draft)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

/// Handle a hotkey command
pub fn handle_hotkey_command<C: Clock>(
    app: &mut CaptureApp<C>,
    paths: &CapturePaths,
    cmd: HotkeyCommands,
) -> CaptureResult<()> {
    match cmd {
        HotkeyCommands::Reset => {
            let mut draft = app.draft_settings();
            draft.reset_hotkey();
            let settings = commit_and_save(app, paths, draft)?;
            println!("Popup hotkey reset to {}", settings.hotkey);
        }
    }

    Ok(())
}

fn commit_and_save<C: Clock>(
    app: &mut CaptureApp<C>,
    paths: &CapturePaths,
    draft: SettingsDraft,
) -> CaptureResult<std::sync::Arc<crate::config::Settings>> {
    let settings = app.commit_settings(draft)?;
    settings.save(paths)?;
    Ok(settings)
}
