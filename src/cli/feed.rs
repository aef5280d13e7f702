//! Feed CLI commands
//!
//! Show today's whole feed, or replace it after editing elsewhere.

use std::io::Read;
use std::path::PathBuf;

use clap::Subcommand;

use crate::app::CaptureApp;
use crate::clock::Clock;
use crate::error::{CaptureError, CaptureResult};
use crate::storage::journal;

/// Feed subcommands
#[derive(Subcommand)]
pub enum FeedCommands {
    /// Print today's journal file
    Show,
    /// Replace today's journal file with new contents
    Replace {
        /// Read the new contents from this file instead of stdin
        #[arg(short, long)]
        from: Option<PathBuf>,
    },
}

/// Handle a feed command
pub fn handle_feed_command<C: Clock>(app: &mut CaptureApp<C>, cmd: FeedCommands) -> CaptureResult<()> {
    match cmd {
        FeedCommands::Show => {
            let path = app.ensure_today_ready()?;
            print!("{}", journal::load(&path)?);
        }

        FeedCommands::Replace { from } => {
            let replacement = match from {
                Some(file) => journal::load(&file)?,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text).map_err(|e| {
                        CaptureError::Io(format!("Failed to read feed from stdin: {}", e))
                    })?;
                    text
                }
            };

            let (_, previous) = app.toggle_feed()?;
            app.buffer_mut().replace(&replacement);
            app.toggle_feed()?;

            let previous_len = previous.map(|p| p.len()).unwrap_or(0);
            println!(
                "Feed replaced ({} bytes -> {} bytes).",
                previous_len,
                replacement.len()
            );
        }
    }

    Ok(())
}
