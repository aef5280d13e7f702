//! Journal inspection CLI commands
//!
//! List the days that have a journal file, and the asset references a day's
//! file contains.

use chrono::NaiveDate;

use crate::app::CaptureApp;
use crate::clock::Clock;
use crate::display::format_reference_list;
use crate::error::{CaptureError, CaptureResult};
use crate::storage::journal;

/// Handle `capture refs`
pub fn handle_refs_command<C: Clock>(app: &CaptureApp<C>, date: Option<String>) -> CaptureResult<()> {
    let path = match date {
        Some(date) => {
            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
                CaptureError::Validation(format!(
                    "Invalid date: '{}'. Use format YYYY-MM-DD",
                    date
                ))
            })?;
            let path = app.vault().journal.path_for_date(date);
            if !path.is_file() {
                return Err(CaptureError::Validation(format!(
                    "No journal file for {}",
                    date.format("%Y-%m-%d")
                )));
            }
            path
        }
        None => app.ensure_today_ready()?,
    };

    let text = journal::load(&path)?;
    print!("{}", format_reference_list(&app.references(&text)));
    Ok(())
}

/// Handle `capture days`
pub fn handle_days_command<C: Clock>(app: &CaptureApp<C>) -> CaptureResult<()> {
    let dates = app.vault().journal.list_dates()?;
    if dates.is_empty() {
        println!("No journal files in {}", app.vault().root().display());
        return Ok(());
    }
    for date in dates {
        println!("{}", journal::filename_for_date(date));
    }
    Ok(())
}
