//! Capture and feed logic
//!
//! Sits between the popup's text buffer and the journal files: decorates
//! captured notes, and switches between appending single notes and editing
//! the whole daily feed.

pub mod buffer;
pub mod controller;
pub mod decorate;

pub use buffer::{NoteBuffer, TextBuffer};
pub use controller::{CaptureOutcome, FeedController, FeedState, FeedToggle};
pub use decorate::decorate_entry;
