//! Entry decoration
//!
//! A captured note becomes:
//!
//! ```text
//! HH:MM:SS[ <rule>]
//! <body>
//! ```
//!
//! with exactly one trailing newline. The header line is omitted when
//! timestamps are disabled, and the rule only ever extends the timestamp line.

use chrono::NaiveDateTime;

use crate::config::Settings;

/// Format of the timestamp header line
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Timestamp string for `now`, e.g. `21:23:08`
pub fn timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Decorate `body` for appending according to `settings`
pub fn decorate_entry(body: &str, settings: &Settings, now: NaiveDateTime) -> String {
    let body = body.trim_end_matches(['\n', '\r']);
    let mut entry = String::with_capacity(body.len() + settings.hr_width + 16);

    if settings.insert_timestamps {
        entry.push_str(&timestamp(now));
        if settings.add_horizontal_rule {
            entry.push(' ');
            entry.push_str(&settings.horizontal_rule());
        }
        entry.push('\n');
    }

    entry.push_str(body);
    entry.push('\n');
    entry
}
