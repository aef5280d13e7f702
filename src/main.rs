use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use casual_capture::app::CaptureApp;
use casual_capture::cli::{
    handle_attach_command, handle_config_command, handle_days_command, handle_feed_command,
    handle_hotkey_command, handle_note_command, handle_refs_command, handle_today_command,
    ConfigCommands, FeedCommands, HotkeyCommands,
};
use casual_capture::config::{CapturePaths, Settings};
use casual_capture::trigger::CommandLineTrigger;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CAPTURE_LOG";

#[derive(Parser)]
#[command(
    name = "capture",
    version,
    about = "Capture notes and images into a daily journal file",
    long_about = "Casual Capture appends timestamped notes and pasted images to one \
                  plain-text journal file per day, kept in a vault directory."
)]
struct Cli {
    /// Vault directory (overrides the configured vault_dir)
    #[arg(long, global = true, env = "CASUAL_CAPTURE_VAULT")]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create today's journal file if needed and print its path
    Today,

    /// Capture a note (reads stdin when no text is given)
    #[command(alias = "n")]
    Note {
        /// Note text
        text: Vec<String>,
    },

    /// Store an image as an asset and capture a reference to it
    Attach {
        /// Image file (png, jpeg, gif, bmp, webp)
        image: PathBuf,
        /// Text to capture above the image
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show or replace today's whole feed
    #[command(subcommand)]
    Feed(FeedCommands),

    /// List asset references in a journal file
    Refs {
        /// Journal date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List days that have a journal file
    Days,

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Popup hotkey management
    #[command(subcommand)]
    Hotkey(HotkeyCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = CapturePaths::new()?;
    let settings = Settings::load_or_create(&paths)?.sanitized();
    let vault_root = cli.vault.unwrap_or_else(|| settings.vault_dir.clone());

    let mut app = CaptureApp::new(&vault_root, settings)?;
    app.install_trigger(Box::new(CommandLineTrigger::new()))?;

    match cli.command {
        Some(Commands::Today) => handle_today_command(&app)?,
        Some(Commands::Note { text }) => handle_note_command(&mut app, text)?,
        Some(Commands::Attach { image, note }) => handle_attach_command(&mut app, image, note)?,
        Some(Commands::Feed(cmd)) => handle_feed_command(&mut app, cmd)?,
        Some(Commands::Refs { date }) => handle_refs_command(&app, date)?,
        Some(Commands::Days) => handle_days_command(&app)?,
        Some(Commands::Config(cmd)) => handle_config_command(&mut app, &paths, cmd)?,
        Some(Commands::Hotkey(cmd)) => handle_hotkey_command(&mut app, &paths, cmd)?,
        None => {
            println!("Casual Capture - daily journal capture");
            println!();
            println!("Run 'capture --help' for usage information.");
            println!("Run 'capture note <text>' to capture a note.");
        }
    }

    app.shutdown();
    Ok(())
}
