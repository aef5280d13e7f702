//! Capture CLI commands
//!
//! Implements the commands that add to today's journal: plain notes and
//! image attachments.

use std::io::Read;
use std::path::PathBuf;

use crate::app::CaptureApp;
use crate::clock::Clock;
use crate::error::{CaptureError, CaptureResult};
use crate::feed::{CaptureOutcome, NoteBuffer};

/// Read a note from the arguments, falling back to stdin when there are none
pub fn read_note_text(words: &[String]) -> CaptureResult<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| CaptureError::Io(format!("Failed to read note from stdin: {}", e)))?;
    Ok(text)
}

/// Handle `capture today`
pub fn handle_today_command<C: Clock>(app: &CaptureApp<C>) -> CaptureResult<()> {
    let path = app.ensure_today_ready()?;
    println!("{}", path.display());
    Ok(())
}

/// Handle `capture note`
pub fn handle_note_command<C: Clock>(app: &mut CaptureApp<C>, words: Vec<String>) -> CaptureResult<()> {
    let text = read_note_text(&words)?;
    match app.capture_append(&text) {
        Ok(outcome) => {
            report_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            report_unsaved(&text);
            Err(e)
        }
    }
}

/// Handle `capture attach`
pub fn handle_attach_command<C: Clock>(
    app: &mut CaptureApp<C>,
    image: PathBuf,
    note: Option<String>,
) -> CaptureResult<()> {
    let bytes = std::fs::read(&image).map_err(|e| {
        CaptureError::Io(format!("Failed to read image {}: {}", image.display(), e))
    })?;

    if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
        app.buffer_mut().insert_at_cursor(&format!("{}\n", note.trim_end()));
    }

    let reference = app.paste_image(&bytes)?;
    println!("Stored asset: {}", reference.path.display());

    match app.capture() {
        Ok(outcome) => {
            report_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            report_unsaved(&app.buffer().current_text());
            Err(e)
        }
    }
}

fn report_outcome(outcome: &CaptureOutcome) {
    match outcome {
        CaptureOutcome::Appended(entry) => {
            println!("Captured {} line(s).", entry.lines().count())
        }
        CaptureOutcome::FeedFlushed => println!("Feed written back."),
        CaptureOutcome::Empty => println!("Nothing to capture."),
    }
}

/// Echo the pending text so a failed write never loses the note
fn report_unsaved(pending: &str) {
    if !pending.trim().is_empty() {
        eprintln!("The note was not saved. Pending text:");
        eprintln!("{}", pending);
    }
}
