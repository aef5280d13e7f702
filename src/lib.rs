//! Casual Capture - quick-capture journaling
//!
//! This library provides the core of a popup journaling tool: notes and
//! pasted images are captured into one plain-text log file per day, inside a
//! vault directory that any later process (or markdown tool) can read.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration paths, settings persistence, live settings
//! - `error`: Custom error types
//! - `clock`: Injectable wall clock
//! - `storage`: Vault paths, permissions, daily journal files, image assets
//! - `feed`: Note buffer, entry decoration, append/overwrite state machine
//! - `trigger`: Capture trigger service
//! - `app`: Application context tying it all together
//! - `cli`, `display`: Command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use casual_capture::app::CaptureApp;
//! use casual_capture::config::Settings;
//!
//! let settings = Settings::default();
//! let vault = settings.vault_dir.clone();
//! let mut app = CaptureApp::new(&vault, settings)?;
//! app.capture_append("an idea worth keeping")?;
//! ```

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod feed;
pub mod storage;
pub mod trigger;

pub use error::{CaptureError, CaptureResult};
