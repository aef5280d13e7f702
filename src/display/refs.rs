//! Asset reference display formatting
//!
//! Formats the image tokens found in a journal file as a table.

use crate::storage::TokenMatch;

/// Format a list of reference tokens, flagging the ones whose file is gone
pub fn format_reference_list(matches: &[TokenMatch]) -> String {
    if matches.is_empty() {
        return "No asset references found.\n".to_string();
    }

    let name_width = matches
        .iter()
        .map(|m| m.reference.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<7}  {}\n",
        "Name",
        "Status",
        "Path",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<7}  {:-<4}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    let mut broken = 0;
    for m in matches {
        let status = if m.reference.resolves() {
            "ok"
        } else {
            broken += 1;
            "missing"
        };
        output.push_str(&format!(
            "{:<name_width$}  {:<7}  {}\n",
            m.reference.name,
            status,
            m.reference.path.display(),
            name_width = name_width,
        ));
    }

    output.push('\n');
    output.push_str(&format!("{} reference(s), {} missing\n", matches.len(), broken));
    output
}
